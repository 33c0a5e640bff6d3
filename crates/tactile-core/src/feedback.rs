//! Capability ports for narration and vibration feedback.
//!
//! Speech synthesis and haptic hardware vary by target platform, so the
//! engines depend on these narrow traits and the composition root binds
//! them to whatever the platform offers. Both capabilities are
//! fire-and-forget: calls must not block and must not fail. A platform
//! without a backend binds the null implementations.

/// Speech synthesis port.
///
/// `speak` queues an utterance at the given rate multiplier; `cancel`
/// discards anything queued or in flight.
pub trait Narrator: Send + Sync {
    fn speak(&self, text: &str, rate: f32);

    fn cancel(&self);
}

/// Vibration port. Patterns alternate vibration and pause durations in
/// milliseconds, starting with a vibration.
pub trait HapticMotor: Send + Sync {
    /// Best-effort: silently ignored when the hardware is unsupported.
    fn vibrate(&self, pattern: &[u64]);
}

/// Narrator that discards all utterances.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNarrator;

impl Narrator for NullNarrator {
    fn speak(&self, _text: &str, _rate: f32) {}

    fn cancel(&self) {}
}

/// Motor that discards all patterns.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMotor;

impl HapticMotor for NullMotor {
    fn vibrate(&self, _pattern: &[u64]) {}
}
