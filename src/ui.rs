/*
 * UI Module
 *
 * This module builds the egui control panel and the on-screen readouts.
 * Slider values live in Controls; the app pushes changed values into the
 * flock between ticks.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{BehaviorFlags, SimulationConfig};

/// Values edited through the control panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub max_force: f32,
    pub max_speed: f32,
    pub time_scale: f32,
    pub show_grid: bool,
    pub show_debug: bool,
}

impl Controls {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            max_force: config.max_force,
            max_speed: config.max_speed,
            time_scale: 1.0,
            show_grid: true,
            show_debug: true,
        }
    }
}

/// Which flock tunables the user moved this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlChanges {
    pub max_force: bool,
    pub max_speed: bool,
}

impl ControlChanges {
    pub fn between(before: &Controls, after: &Controls) -> Self {
        Self {
            max_force: before.max_force != after.max_force,
            max_speed: before.max_speed != after.max_speed,
        }
    }
}

pub fn update_ui(
    egui: &mut Egui,
    controls: &mut Controls,
    debug_info: &DebugInfo,
    flags: BehaviorFlags,
) -> ControlChanges {
    let before = controls.clone();
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.add(
                egui::Slider::new(&mut controls.max_force, SimulationConfig::max_force_range())
                    .text("Force"),
            );
            ui.add(
                egui::Slider::new(&mut controls.max_speed, SimulationConfig::max_speed_range())
                    .text("Speed"),
            );
            ui.add(
                egui::Slider::new(&mut controls.time_scale, SimulationConfig::time_scale_range())
                    .text("Sim x"),
            );

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Boids: {}", debug_info.last_tick.agents));
            ui.label(format!("Alignment [1]: {}", on_off(flags.alignment)));
            ui.label(format!("Cohesion [2]: {}", on_off(flags.cohesion)));
            ui.label(format!("Separation [3]: {}", on_off(flags.separation)));

            ui.separator();
            ui.checkbox(&mut controls.show_grid, "Show Cell Grid");
            ui.checkbox(&mut controls.show_debug, "Show Debug Info");
        });

    ControlChanges::between(&before, controls)
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

// Draw debug information in the top-left corner of the window
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    time_scale: f32,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", debug_info.last_tick.agents),
        format!("Tick: {}", debug_info.last_tick.tick),
        format!("Relocations: {}", debug_info.last_tick.relocations),
        format!("Sim x: {:.2}", time_scale),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_moved_sliders() {
        let before = Controls::from_config(&SimulationConfig::default());
        let mut after = before.clone();
        assert_eq!(ControlChanges::between(&before, &after), ControlChanges::default());

        after.max_speed = 120.0;
        after.time_scale = 2.0;
        let changes = ControlChanges::between(&before, &after);
        assert!(changes.max_speed);
        assert!(!changes.max_force);
    }
}
