/*
 * Toroidal Boids
 *
 * Boids flock on a plane that wraps at every edge, following three rules:
 * 1. Separation: avoid crowding neighbors
 * 2. Alignment: steer towards the average heading of neighbors
 * 3. Cohesion: steer towards the average position of neighbors
 *
 * Neighbors come from a uniform grid over the world. Sliders adjust force,
 * speed and simulation rate in real time. Set RUST_LOG to change log output.
 */

use toroidal_boids::app;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    nannou::app(app::model).update(app::update).run();
}
