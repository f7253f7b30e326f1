/*
 * Debug Information Module
 *
 * Frame timing and the last tick summary, shown in the UI panel.
 */

use std::time::Duration;

use crate::physics::TickSummary;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub last_tick: TickSummary,
}

impl DebugInfo {
    pub fn record_frame(&mut self, frame_time: Duration, tick: TickSummary) {
        self.frame_time = frame_time;
        let seconds = frame_time.as_secs_f32();
        if seconds > 0.0 {
            self.fps = 1.0 / seconds;
        }
        self.last_tick = tick;
    }
}
