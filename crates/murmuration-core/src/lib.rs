//! Core flocking simulation shared across the murmuration workspace.
//!
//! A fixed population of agents, partitioned into groups, chases per-group
//! wandering targets inside a bounded volume. Every frame runs the same
//! two-phase pipeline: a data-parallel steering solve over the previous
//! frame's committed state, then a data-parallel motion integration that
//! commits new poses and render transforms.

use glam::{Mat3, Mat4, Quat, Vec3};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Gain applied to obstacle vectors when they steer an agent.
pub const OBSTACLE_PUSH_GAIN: f32 = 100.0;

/// High-level simulation clock (frames processed since setup).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tick(pub u64);

impl Tick {
    /// Next tick value.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Starting tick.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// Errors surfaced while constructing a flock world.
#[derive(Debug, Error)]
pub enum FlockError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Axis-aligned world volume with a fractional soft margin.
///
/// The volume agents are steered back into, and targets are sampled from,
/// is the *inner region*: `center ± extents * (1 - threshold) / 2` on each
/// axis. The band between the inner region and the full extents acts as a
/// buffer where boundary pressure takes over before agents leave the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldBounds {
    /// Center of the world volume.
    pub center: Vec3,
    /// Full edge lengths of the world volume.
    pub extents: Vec3,
    /// Fraction of the extents reserved as the soft-margin band.
    pub threshold: f32,
}

impl WorldBounds {
    /// Bounds centered at `center` spanning `extents` with the given margin.
    #[must_use]
    pub const fn new(center: Vec3, extents: Vec3, threshold: f32) -> Self {
        Self {
            center,
            extents,
            threshold,
        }
    }

    /// Half edge lengths of the inner region.
    #[must_use]
    pub fn inner_half_extents(&self) -> Vec3 {
        self.extents * ((1.0 - self.threshold) * 0.5)
    }

    /// Containment test against the inner region, boundary inclusive.
    #[must_use]
    pub fn contains_inner(&self, point: Vec3) -> bool {
        let offset = (point - self.center).abs();
        let half = self.inner_half_extents();
        offset.x <= half.x && offset.y <= half.y && offset.z <= half.z
    }

    /// Sample a uniform point inside the inner region, each axis independent.
    pub fn sample_inner(&self, rng: &mut SmallRng) -> Vec3 {
        let half = self.inner_half_extents();
        self.center
            + Vec3::new(
                rng.random_range(-half.x..=half.x),
                rng.random_range(-half.y..=half.y),
                rng.random_range(-half.z..=half.z),
            )
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            extents: Vec3::new(30.0, 20.0, 30.0),
            threshold: 0.15,
        }
    }
}

/// Rule strengths blended by the steering solver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SteeringWeights {
    /// Pull toward the average perceived neighbor position.
    pub cohesion: f32,
    /// Gain on the accumulated repulsion vector.
    pub separation: f32,
    /// Pull toward the average same-group heading.
    pub alignment: f32,
    /// Per-neighbor repulsion from members of other groups.
    pub group_avoid: f32,
    /// Pull toward the group's wandering target.
    pub target_seek: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            cohesion: 1.0,
            separation: 1.0,
            alignment: 1.0,
            group_avoid: 0.2,
            target_seek: 2.33,
        }
    }
}

/// Static configuration for a flock simulation.
///
/// Validated once by [`FlockWorld::new`]; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockConfig {
    /// Number of simulated agents, fixed for the lifetime of the world.
    pub agent_count: usize,
    /// Number of independent sub-flocks agents are assigned to.
    pub group_count: usize,
    /// World volume and soft-margin threshold.
    pub bounds: WorldBounds,
    /// Steering rule strengths.
    pub weights: SteeringWeights,
    /// Distance within which other agents are perceived.
    pub vision_radius: f32,
    /// Distance below which close-range repulsion always applies.
    pub collision_radius: f32,
    /// Lower clamp on per-frame speed.
    pub min_speed: f32,
    /// Upper clamp on per-frame speed.
    pub max_speed: f32,
    /// Per-group, per-frame probability of resampling the wander target.
    pub target_resample_chance: f32,
    /// Whether the collision probe is queried each frame.
    pub obstacle_avoidance: bool,
    /// Uniform render scale baked into every emitted transform.
    pub entity_scale: Vec3,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            agent_count: 100,
            group_count: 10,
            bounds: WorldBounds::default(),
            weights: SteeringWeights::default(),
            vision_radius: 2.0,
            collision_radius: 0.5,
            min_speed: 0.2,
            max_speed: 1.0,
            target_resample_chance: 0.001,
            obstacle_avoidance: true,
            entity_scale: Vec3::ONE,
            rng_seed: None,
        }
    }
}

impl FlockConfig {
    /// Validates the configuration ahead of world construction.
    pub fn validate(&self) -> Result<(), FlockError> {
        if self.agent_count == 0 {
            return Err(FlockError::InvalidConfig("agent_count must be non-zero"));
        }
        if self.group_count == 0 {
            return Err(FlockError::InvalidConfig("group_count must be non-zero"));
        }
        if !self.bounds.center.is_finite() || !self.bounds.extents.is_finite() {
            return Err(FlockError::InvalidConfig("bounds must be finite"));
        }
        if self.bounds.extents.min_element() <= 0.0 {
            return Err(FlockError::InvalidConfig(
                "bounds extents must be positive on every axis",
            ));
        }
        if !(0.0..1.0).contains(&self.bounds.threshold) {
            return Err(FlockError::InvalidConfig(
                "bounds threshold must lie in [0, 1)",
            ));
        }
        if !self.vision_radius.is_finite()
            || !self.collision_radius.is_finite()
            || !self.min_speed.is_finite()
            || !self.max_speed.is_finite()
        {
            return Err(FlockError::InvalidConfig(
                "radii and speed bounds must be finite",
            ));
        }
        if self.vision_radius <= 0.0 {
            return Err(FlockError::InvalidConfig("vision_radius must be positive"));
        }
        if self.collision_radius <= 0.0 {
            return Err(FlockError::InvalidConfig(
                "collision_radius must be positive",
            ));
        }
        if self.min_speed <= 0.0 || self.max_speed <= 0.0 {
            return Err(FlockError::InvalidConfig("speed bounds must be positive"));
        }
        if self.max_speed < self.min_speed {
            return Err(FlockError::InvalidConfig(
                "max_speed must not be below min_speed",
            ));
        }
        if !(0.0..=1.0).contains(&self.target_resample_chance) {
            return Err(FlockError::InvalidConfig(
                "target_resample_chance must be a probability in [0, 1]",
            ));
        }
        if !self.entity_scale.is_finite() || self.entity_scale.min_element() <= 0.0 {
            return Err(FlockError::InvalidConfig(
                "entity_scale must be positive on every axis",
            ));
        }
        Ok(())
    }

    /// Returns an RNG for the configured seed, generating one from entropy if absent.
    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

/// Per-agent transform handed to the render sink each frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
}

impl InstanceTransform {
    /// Compose into a column-major TRS matrix for instanced submission.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Events emitted after processing one frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FrameEvents {
    /// Clock value after the frame was processed.
    pub tick: Tick,
    /// Number of groups whose wander target was resampled this frame.
    pub targets_resampled: u32,
}

/// Obstacle query serviced by the embedding host.
///
/// The scheduler issues exactly one cast per agent per frame, in agent-index
/// order: `origin` sits behind the agent by one vision radius along its
/// heading, `direction` is the heading itself, `radius` is the collision
/// radius, and `max_distance` spans two vision radii, so the swept volume
/// ends one vision radius ahead of the agent. Implementations return the
/// world-space hit point closest to the origin, or `None` for a miss. A host
/// that cannot service the query returns `None` and the frame proceeds as if
/// nothing was hit.
pub trait CollisionProbe: Send {
    fn cast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
    ) -> Option<Vec3>;
}

/// Probe that never reports a hit.
#[derive(Debug, Default)]
pub struct NullProbe;

impl CollisionProbe for NullProbe {
    fn cast(
        &mut self,
        _origin: Vec3,
        _direction: Vec3,
        _radius: f32,
        _max_distance: f32,
    ) -> Option<Vec3> {
        None
    }
}

/// Render hand-off invoked once at the end of every frame.
pub trait RenderSink: Send {
    fn present(&mut self, tick: Tick, transforms: &[InstanceTransform]);
}

/// No-op render sink.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _tick: Tick, _transforms: &[InstanceTransform]) {}
}

/// Dense per-agent state columns sized once at setup.
///
/// Row `i` across every column belongs to agent `i`; the row count never
/// changes after spawn. Headings are unit length, orientations are unit
/// quaternions, and group ids index the world's target table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentColumns {
    positions: Vec<Vec3>,
    headings: Vec<Vec3>,
    orientations: Vec<Quat>,
    groups: Vec<u32>,
    obstacle_vectors: Vec<Vec3>,
    accelerations: Vec<Vec3>,
    transforms: Vec<InstanceTransform>,
}

impl AgentColumns {
    fn spawn(config: &FlockConfig, rng: &mut SmallRng) -> Self {
        let count = config.agent_count;
        let mut positions = Vec::with_capacity(count);
        let mut headings = Vec::with_capacity(count);
        let mut groups = Vec::with_capacity(count);
        for index in 0..count {
            positions.push(config.bounds.sample_inner(rng));
            headings.push(random_unit_vector(rng));
            groups.push((index % config.group_count) as u32);
        }
        let transforms = positions
            .iter()
            .map(|&position| InstanceTransform {
                position,
                orientation: Quat::IDENTITY,
                scale: config.entity_scale,
            })
            .collect();
        Self {
            positions,
            headings,
            orientations: vec![Quat::IDENTITY; count],
            groups,
            obstacle_vectors: vec![Vec3::ZERO; count],
            accelerations: vec![Vec3::ZERO; count],
            transforms,
        }
    }

    /// Number of agent rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the columns hold no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Agent positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable agent positions.
    #[must_use]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    /// Unit forward headings.
    #[must_use]
    pub fn headings(&self) -> &[Vec3] {
        &self.headings
    }

    /// Mutable unit forward headings.
    #[must_use]
    pub fn headings_mut(&mut self) -> &mut [Vec3] {
        &mut self.headings
    }

    /// Agent orientations.
    #[must_use]
    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    /// Mutable agent orientations.
    #[must_use]
    pub fn orientations_mut(&mut self) -> &mut [Quat] {
        &mut self.orientations
    }

    /// Group assignment per agent; fixed after spawn.
    #[must_use]
    pub fn groups(&self) -> &[u32] {
        &self.groups
    }

    /// Obstacle vectors refreshed from the collision probe.
    #[must_use]
    pub fn obstacle_vectors(&self) -> &[Vec3] {
        &self.obstacle_vectors
    }

    /// Mutable obstacle vectors (host-side injection when probing is off).
    #[must_use]
    pub fn obstacle_vectors_mut(&mut self) -> &mut [Vec3] {
        &mut self.obstacle_vectors
    }

    /// Last committed steering vectors.
    #[must_use]
    pub fn accelerations(&self) -> &[Vec3] {
        &self.accelerations
    }

    /// Mutable steering vectors.
    #[must_use]
    pub fn accelerations_mut(&mut self) -> &mut [Vec3] {
        &mut self.accelerations
    }

    /// Render transforms committed by the latest frame.
    #[must_use]
    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }
}

/// Sample a uniformly distributed unit vector by rejection inside the unit ball.
fn random_unit_vector(rng: &mut SmallRng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let length_sq = candidate.length_squared();
        if length_sq > 1e-4 && length_sq <= 1.0 {
            return candidate / length_sq.sqrt();
        }
    }
}

/// Rotation aligning +Z with `forward`, keeping +Y as close to `up` as the
/// basis allows. Falls back to an arbitrary orthonormal axis when `forward`
/// and `up` are parallel.
fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let forward = forward.normalize();
    let mut right = up.cross(forward);
    if right.length_squared() <= f32::EPSILON {
        right = forward.any_orthonormal_vector();
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
}

/// Read-only view of one frame's committed state, solving steering per agent.
///
/// Safe to fan out over agents in any order: every read targets the previous
/// frame's snapshot and the single write lands in a caller-owned slot.
struct SteeringPass<'a> {
    positions: &'a [Vec3],
    headings: &'a [Vec3],
    groups: &'a [u32],
    obstacle_vectors: &'a [Vec3],
    targets: &'a [Vec3],
    bounds: WorldBounds,
    weights: SteeringWeights,
    vision_radius: f32,
    collision_radius: f32,
}

impl SteeringPass<'_> {
    /// Solve the steering vector for one agent; `None` keeps the stale slot.
    fn steer(&self, index: usize) -> Option<Vec3> {
        let position = self.positions[index];
        let obstacle = self.obstacle_vectors[index];

        // Boundary pressure outranks everything else.
        if !self.bounds.contains_inner(position) {
            let mut escape = self.bounds.center - position;
            if obstacle != Vec3::ZERO {
                escape += obstacle * OBSTACLE_PUSH_GAIN;
            }
            return Some(escape);
        }

        // An obstacle in view preempts flocking entirely.
        if obstacle != Vec3::ZERO {
            return Some(obstacle * OBSTACLE_PUSH_GAIN);
        }

        let group = self.groups[index];
        let mut cohesion = Vec3::ZERO;
        let mut separation = Vec3::ZERO;
        let mut alignment = Vec3::ZERO;
        let mut perceived = 0u32;
        let mut aligned = 0u32;

        for (other, &other_position) in self.positions.iter().enumerate() {
            if other == index {
                continue;
            }
            let distance = position.distance(other_position);
            let same_group = self.groups[other] == group;

            if distance > self.vision_radius {
                // Same-group members stay perceived at any range.
                if same_group {
                    cohesion += other_position;
                    perceived += 1;
                }
                continue;
            }

            perceived += 1;
            cohesion += other_position;

            if same_group {
                alignment += self.headings[other];
                aligned += 1;
            } else {
                separation +=
                    (position - other_position).normalize_or_zero() * self.weights.group_avoid;
            }

            if distance < self.collision_radius {
                separation += position - other_position;
            }
        }

        // Nobody perceived: the previous steering vector stays in force.
        if perceived == 0 {
            return None;
        }

        cohesion /= perceived as f32;
        if aligned > 0 {
            alignment /= aligned as f32;
        }
        let target_direction = self.targets[group as usize] - position;

        let steering = cohesion * self.weights.cohesion
            + separation * self.weights.separation
            + alignment * self.weights.alignment
            - position
            + target_direction * self.weights.target_seek;
        (steering != Vec3::ZERO).then_some(steering)
    }
}

/// Frame-global inputs for the integration pass.
struct MotionPass {
    delta_time: f32,
    min_speed: f32,
    max_speed: f32,
    scale: Vec3,
}

/// One agent's integration output, committed after the solver barrier.
struct MotionUpdate {
    position: Vec3,
    orientation: Quat,
    heading: Vec3,
    transform: InstanceTransform,
}

impl MotionPass {
    fn integrate(&self, position: Vec3, orientation: Quat, acceleration: Vec3) -> MotionUpdate {
        let direction = acceleration.normalize_or_zero();
        if direction == Vec3::ZERO {
            // No steering direction: hold the pose and stay put.
            return MotionUpdate {
                position,
                orientation,
                heading: orientation * Vec3::Z,
                transform: InstanceTransform {
                    position,
                    orientation,
                    scale: self.scale,
                },
            };
        }

        let speed = acceleration.length().clamp(self.min_speed, self.max_speed);
        let desired = look_rotation(direction, Vec3::Y);
        // Slerp factor is the raw frame time, held to [0, 1].
        let orientation = orientation
            .slerp(desired, self.delta_time.clamp(0.0, 1.0))
            .normalize();
        let heading = orientation * Vec3::Z;
        let position = position + heading * speed * self.delta_time;

        MotionUpdate {
            position,
            orientation,
            heading,
            transform: InstanceTransform {
                position,
                orientation,
                scale: self.scale,
            },
        }
    }
}

/// Aggregate simulation state, advanced one frame at a time by a host loop.
pub struct FlockWorld {
    config: FlockConfig,
    tick: Tick,
    columns: AgentColumns,
    targets: Vec<Vec3>,
    group_rngs: Vec<SmallRng>,
    probe: Box<dyn CollisionProbe>,
    sink: Box<dyn RenderSink>,
}

impl fmt::Debug for FlockWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlockWorld")
            .field("config", &self.config)
            .field("tick", &self.tick)
            .field("agent_count", &self.columns.len())
            .finish_non_exhaustive()
    }
}

impl FlockWorld {
    /// Instantiate a world with null collaborators.
    pub fn new(config: FlockConfig) -> Result<Self, FlockError> {
        Self::with_collaborators(config, Box::new(NullProbe), Box::new(NullSink))
    }

    /// Instantiate a world wired to the supplied collision probe and render sink.
    pub fn with_collaborators(
        config: FlockConfig,
        probe: Box<dyn CollisionProbe>,
        sink: Box<dyn RenderSink>,
    ) -> Result<Self, FlockError> {
        config.validate()?;
        let mut rng = config.seeded_rng();
        let mut group_rngs: Vec<SmallRng> = (0..config.group_count)
            .map(|_| SmallRng::seed_from_u64(rng.random()))
            .collect();
        let targets = group_rngs
            .iter_mut()
            .map(|group_rng| config.bounds.sample_inner(group_rng))
            .collect();
        let columns = AgentColumns::spawn(&config, &mut rng);
        Ok(Self {
            config,
            tick: Tick::zero(),
            columns,
            targets,
            group_rngs,
            probe,
            sink,
        })
    }

    /// Refresh per-agent obstacle vectors from the collision probe.
    fn stage_probe_refresh(&mut self) {
        if !self.config.obstacle_avoidance {
            return;
        }
        let vision_radius = self.config.vision_radius;
        let collision_radius = self.config.collision_radius;
        for index in 0..self.columns.len() {
            let position = self.columns.positions[index];
            let heading = self.columns.headings[index];
            let origin = position - heading * vision_radius;
            let hit = self
                .probe
                .cast(origin, heading, collision_radius, vision_radius * 2.0);
            self.columns.obstacle_vectors[index] =
                hit.map_or(Vec3::ZERO, |point| position - point);
        }
    }

    /// Roll each group's resample chance and move its wander target on success.
    fn stage_retarget(&mut self) -> u32 {
        let chance = self.config.target_resample_chance;
        if chance <= 0.0 {
            return 0;
        }
        let bounds = self.config.bounds;
        let mut resampled = 0;
        for (target, rng) in self.targets.iter_mut().zip(self.group_rngs.iter_mut()) {
            if rng.random::<f32>() < chance {
                *target = bounds.sample_inner(rng);
                resampled += 1;
            }
        }
        resampled
    }

    /// Fan the steering solve out over all agents and commit the results.
    fn stage_steering(&mut self) {
        let pass = SteeringPass {
            positions: &self.columns.positions,
            headings: &self.columns.headings,
            groups: &self.columns.groups,
            obstacle_vectors: &self.columns.obstacle_vectors,
            targets: &self.targets,
            bounds: self.config.bounds,
            weights: self.config.weights,
            vision_radius: self.config.vision_radius,
            collision_radius: self.config.collision_radius,
        };
        let steered: Vec<Option<Vec3>> = (0..self.columns.len())
            .into_par_iter()
            .map(|index| pass.steer(index))
            .collect();

        // Committing after the full solve is the solver/integrator barrier:
        // no integration reads a partially written acceleration column.
        for (slot, steering) in self.columns.accelerations.iter_mut().zip(steered) {
            if let Some(steering) = steering {
                *slot = steering;
            }
        }
    }

    /// Fan the motion integration out over all agents and commit new poses.
    fn stage_integrate(&mut self, delta_time: f32) {
        let pass = MotionPass {
            delta_time,
            min_speed: self.config.min_speed,
            max_speed: self.config.max_speed,
            scale: self.config.entity_scale,
        };
        let columns = &self.columns;
        let updates: Vec<MotionUpdate> = (0..columns.len())
            .into_par_iter()
            .map(|index| {
                pass.integrate(
                    columns.positions[index],
                    columns.orientations[index],
                    columns.accelerations[index],
                )
            })
            .collect();

        for (index, update) in updates.into_iter().enumerate() {
            self.columns.positions[index] = update.position;
            self.columns.orientations[index] = update.orientation;
            self.columns.headings[index] = update.heading;
            self.columns.transforms[index] = update.transform;
        }
    }

    /// Hand the committed transforms to the render sink.
    fn stage_present(&mut self) {
        self.sink.present(self.tick, &self.columns.transforms);
    }

    /// Execute one frame of the pipeline.
    ///
    /// Stages run in a fixed order: probe refresh, target resampling, the
    /// parallel steering solve, the parallel motion integration, then the
    /// render hand-off. `delta_time` is the host frame's elapsed seconds.
    pub fn step(&mut self, delta_time: f32) -> FrameEvents {
        debug_assert!(delta_time.is_finite(), "delta_time must be finite");

        self.stage_probe_refresh();
        let targets_resampled = self.stage_retarget();
        self.stage_steering();
        self.stage_integrate(delta_time);
        self.tick = self.tick.next();
        self.stage_present();

        FrameEvents {
            tick: self.tick,
            targets_resampled,
        }
    }

    /// Returns an immutable reference to configuration.
    #[must_use]
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Frames processed since setup.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Number of simulated agents.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.columns.len()
    }

    /// Read-only access to the agent columns.
    #[must_use]
    pub fn agents(&self) -> &AgentColumns {
        &self.columns
    }

    /// Mutable access to the agent columns (for host-side edits).
    #[must_use]
    pub fn agents_mut(&mut self) -> &mut AgentColumns {
        &mut self.columns
    }

    /// Current per-group wander targets, indexed by group id.
    #[must_use]
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Replace the collision probe.
    pub fn set_probe(&mut self, probe: Box<dyn CollisionProbe>) {
        self.probe = probe;
    }

    /// Replace the render sink.
    pub fn set_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.sink = sink;
    }
}
