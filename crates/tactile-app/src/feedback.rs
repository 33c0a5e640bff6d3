//! Terminal bindings for the narration and haptic ports.

use tactile_core::feedback::{HapticMotor, Narrator};

/// Prints narration lines to stdout, marking non-default rates.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn speak(&self, text: &str, rate: f32) {
        if (rate - 1.0).abs() < f32::EPSILON {
            println!("[voice] {}", text);
        } else {
            println!("[voice x{:.1}] {}", rate, text);
        }
    }

    fn cancel(&self) {}
}

/// Prints vibration patterns; a terminal has no motor to drive.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMotor;

impl HapticMotor for LogMotor {
    fn vibrate(&self, pattern: &[u64]) {
        println!("[buzz] {:?}", pattern);
    }
}
