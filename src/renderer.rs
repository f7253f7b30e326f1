/*
 * Renderer Module
 *
 * Draws the flock into the nannou window. World coordinates run from the
 * top-left corner with y pointing down; nannou's window origin is the
 * centre with y pointing up, so every point passes through world_to_screen.
 */

use nannou::prelude::*;
use std::f32::consts::PI;
use tracing::error;

use crate::app::Model;
use crate::boid::Boid;
use crate::params::SimulationConfig;
use crate::ui;
use crate::vector::VecExt;

// Angle between the nose and each tail point of the arrow
const TAIL_ANGLE: f32 = 2.5 * PI / 3.0;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let config = model.flock.config();
    if model.controls.show_grid {
        draw_cell_dots(&draw, config);
    }

    for (_, boid) in model.flock.iter() {
        let [r, g, b, a] = boid.color;
        let points = arrow_points(boid)
            .map(|p| world_to_screen(p, config.world_width, config.world_height));
        draw.polygon()
            .color(rgba(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ))
            .points(points);
    }

    if model.controls.show_debug {
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            app.window_rect(),
            model.controls.time_scale,
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!("failed to draw frame: {err:?}");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!("failed to draw ui: {err:?}");
    }
}

/// Nose, left tail, centre and right tail of a boid's arrow, in world space.
pub fn arrow_points(boid: &Boid) -> [Vec2; 4] {
    let angle = boid.velocity.heading();
    let size = boid.size;
    let at = |theta: f32| boid.position + vec2(theta.cos(), theta.sin()) * size;
    [
        at(angle),
        at(angle + TAIL_ANGLE),
        boid.position,
        at(angle - TAIL_ANGLE),
    ]
}

// Faint dots on every interior cell corner
fn draw_cell_dots(draw: &Draw, config: &SimulationConfig) {
    let n = config.cells_per_axis;
    let gap = vec2(config.cell_width(), config.cell_height());
    for i in 1..n {
        for j in 1..n {
            let corner = vec2(i as f32 * gap.x, j as f32 * gap.y);
            draw.ellipse()
                .xy(world_to_screen(corner, config.world_width, config.world_height))
                .radius(1.0)
                .color(BLUE);
        }
    }
}

#[inline]
pub fn world_to_screen(point: Vec2, width: f32, height: f32) -> Vec2 {
    vec2(point.x - width / 2.0, height / 2.0 - point.y)
}

#[inline]
pub fn screen_to_world(point: Vec2, width: f32, height: f32) -> Vec2 {
    vec2(point.x + width / 2.0, height / 2.0 - point.y)
}
