use anyhow::Result;
use glam::Vec3;
use murmuration_core::{
    CollisionProbe, FlockConfig, FlockWorld, InstanceTransform, RenderSink, Tick,
};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

fn main() -> Result<()> {
    init_tracing();
    let (mut world, stats) = bootstrap_world()?;
    info!(
        agents = world.agent_count(),
        groups = world.config().group_count,
        seed = ?world.config().rng_seed,
        "Starting murmuration simulation shell"
    );

    let delta_time = 1.0 / 60.0;
    let mut resampled_total: u64 = 0;
    for _ in 0..600 {
        let events = world.step(delta_time);
        resampled_total += u64::from(events.targets_resampled);
        if events.tick.0.is_multiple_of(120) {
            let snapshot = stats.lock().map(|s| s.clone()).unwrap_or_default();
            info!(
                tick = events.tick.0,
                centroid_x = snapshot.centroid.x,
                centroid_y = snapshot.centroid.y,
                centroid_z = snapshot.centroid.z,
                spread = snapshot.spread,
                resampled = resampled_total,
                "Flock progress"
            );
        }
    }

    let snapshot = stats.lock().map(|s| s.clone()).unwrap_or_default();
    if snapshot.frames == 0 {
        warn!("Render sink never received a frame");
    } else {
        info!(
            frames = snapshot.frames,
            spread = snapshot.spread,
            "Simulation complete"
        );
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn bootstrap_world() -> Result<(FlockWorld, Arc<Mutex<FlockStats>>)> {
    let config = FlockConfig {
        rng_seed: Some(0xF10C_0001),
        ..FlockConfig::default()
    };
    let probe = SphereProbe {
        center: Vec3::new(0.0, 0.0, 6.0),
        radius: 2.5,
    };
    let sink = TelemetrySink::default();
    let stats = sink.stats.clone();
    let world = FlockWorld::with_collaborators(config, Box::new(probe), Box::new(sink))?;
    Ok((world, stats))
}

/// Analytic stand-in for a physics scene: one solid sphere in the volume.
struct SphereProbe {
    center: Vec3,
    radius: f32,
}

impl CollisionProbe for SphereProbe {
    fn cast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
    ) -> Option<Vec3> {
        // Sweeping a sphere of `radius` along the ray is the same test as a
        // plain ray against this obstacle inflated by that amount.
        let inflated = self.radius + radius;
        let offset = origin - self.center;
        let b = offset.dot(direction);
        let c = offset.length_squared() - inflated * inflated;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        if t < 0.0 || t > max_distance {
            return None;
        }
        Some(origin + direction * t)
    }
}

/// Latest aggregate view of the flock, refreshed by the render sink.
#[derive(Debug, Clone, Default)]
struct FlockStats {
    centroid: Vec3,
    spread: f32,
    frames: u64,
}

#[derive(Clone, Default)]
struct TelemetrySink {
    stats: Arc<Mutex<FlockStats>>,
}

impl RenderSink for TelemetrySink {
    fn present(&mut self, _tick: Tick, transforms: &[InstanceTransform]) {
        if transforms.is_empty() {
            return;
        }
        let mut centroid = Vec3::ZERO;
        for transform in transforms {
            centroid += transform.position;
        }
        centroid /= transforms.len() as f32;
        let spread = transforms
            .iter()
            .map(|transform| transform.position.distance(centroid))
            .fold(0.0f32, f32::max);
        if let Ok(mut stats) = self.stats.lock() {
            stats.centroid = centroid;
            stats.spread = spread;
            stats.frames += 1;
        }
    }
}
