/*
 * Application Module
 *
 * This module defines the nannou model and the per-frame update:
 * 1. Run the egui panel and push changed sliders into the flock
 * 2. Scale the frame time by the simulation speed
 * 3. Apply held-key commands and advance the flock one tick
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::input;
use crate::params::SimulationConfig;
use crate::renderer;
use crate::ui::{self, Controls};
use crate::INITIAL_BOIDS;

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub controls: Controls,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = SimulationConfig::default();

    let window_id = app
        .new_window()
        .title("Toroidal Boids")
        .size(config.world_width as u32, config.world_height as u32)
        .view(renderer::view)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_released(input::key_released)
        .resized(input::resized)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build window");

    let window = app.window(window_id).expect("window closed during setup");
    let egui = Egui::from_window(&window);

    let controls = Controls::from_config(&config);
    let mut flock = Flock::new(config).expect("default simulation config is valid");
    for _ in 0..INITIAL_BOIDS {
        flock.spawn_random();
    }
    info!(boids = flock.len(), "flock ready");

    Model {
        flock,
        controls,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    let changes = ui::update_ui(
        &mut model.egui,
        &mut model.controls,
        &model.debug_info,
        model.flock.flags(),
    );
    if changes.max_force {
        if let Err(err) = model.flock.set_max_force(model.controls.max_force) {
            warn!("rejected max force: {err}");
        }
    }
    if changes.max_speed {
        if let Err(err) = model.flock.set_max_speed(model.controls.max_speed) {
            warn!("rejected max speed: {err}");
        }
    }

    let delta_time = update.since_last.as_secs_f32() * model.controls.time_scale;
    let summary = model.flock.tick(delta_time);
    if !summary.skipped {
        input::apply_held_keys(app, &mut model.flock, delta_time);
    }
    model.debug_info.record_frame(update.since_last, summary);
}
