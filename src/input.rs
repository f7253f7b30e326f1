/*
 * Input Module
 *
 * This module maps window events and held keys onto flock commands.
 *
 * - Click: add a boid under the cursor
 * - Scroll: add a boid at a random spot
 * - 1 / 2 / 3: toggle alignment / cohesion / separation for every boid
 * - Q (held): remove random boids
 * - R (held): rotate every heading
 * - T (held): scramble headings
 * - W / A / S / D (held): nudge the whole flock
 * - Resize: resize the world to the window
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use tracing::{debug, warn};

use crate::app::Model;
use crate::flock::Flock;
use crate::renderer::screen_to_world;

// Degrees per second of simulated time while R is held
const ROTATE_RATE: f32 = 250.0;
// Largest random turn applied by T
const SCRAMBLE_DEGREES: f32 = 50.0;
// Units per second of simulated time for WASD
const NUDGE_RATE: f32 = 10.0;

// Add a boid where the mouse button was released, unless egui owns the pointer
pub fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.egui.ctx().is_pointer_over_area() {
        return;
    }
    let config = model.flock.config();
    let position = screen_to_world(app.mouse.position(), config.world_width, config.world_height);
    let id = model.flock.spawn_at(position);
    debug!(?id, x = position.x, y = position.y, "added boid at cursor");
}

pub fn mouse_wheel(_app: &App, model: &mut Model, _delta: MouseScrollDelta, _phase: TouchPhase) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    model.flock.spawn_random();
}

pub fn key_released(_app: &App, model: &mut Model, key: Key) {
    let flags = model.flock.flags();
    match key {
        Key::Key1 => model.flock.set_alignment_all(!flags.alignment),
        Key::Key2 => model.flock.set_cohesion_all(!flags.cohesion),
        Key::Key3 => model.flock.set_separation_all(!flags.separation),
        _ => return,
    }
    debug!(flags = ?model.flock.flags(), "behaviour toggled");
}

pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    // Minimised windows report a zero size; keep the old world
    if let Err(err) = model.flock.resize(size.x, size.y) {
        warn!(width = size.x, height = size.y, "ignoring resize: {err}");
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

/// Continuous commands for keys held during this frame.
pub fn apply_held_keys(app: &App, flock: &mut Flock, delta_time: f32) {
    let down = &app.keys.down;

    if down.contains(&Key::Q) {
        flock.remove_random();
    }
    if down.contains(&Key::R) {
        flock.rotate_all(ROTATE_RATE * delta_time);
    }
    if down.contains(&Key::T) {
        flock.scramble_headings(SCRAMBLE_DEGREES);
    }

    let step = NUDGE_RATE * delta_time;
    let mut offset = Vec2::ZERO;
    if down.contains(&Key::A) {
        offset.x -= step;
    }
    if down.contains(&Key::D) {
        offset.x += step;
    }
    // World y grows downwards
    if down.contains(&Key::W) {
        offset.y -= step;
    }
    if down.contains(&Key::S) {
        offset.y += step;
    }
    if offset != Vec2::ZERO {
        flock.nudge_all(offset);
    }
}
