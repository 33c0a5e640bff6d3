//! Speech recognizer capability port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tactile_core::error::{Result, TactileError};

/// Platform speech recognition port.
///
/// Covers only the control surface the navigator drives. Transcript and
/// lifecycle notifications flow the other way: the platform binding calls
/// `VoiceNavigator::handle_transcript`, `handle_recognizer_started`,
/// `handle_recognizer_ended`, and `handle_recognizer_error`.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin a recognition session.
    fn start(&self) -> Result<()>;

    /// Request a graceful stop; a final transcript may still be delivered.
    fn stop(&self);

    /// Abort immediately, discarding any pending result.
    fn abort(&self);
}

/// Recording recognizer for tests and headless demos.
///
/// Clones share counters, so a caller can hand one clone to the navigator
/// and inspect the other.
#[derive(Clone, Default)]
pub struct ScriptedRecognizer {
    inner: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    starts: AtomicUsize,
    stops: AtomicUsize,
    aborts: AtomicUsize,
    fail_start: bool,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recognizer whose `start` always fails.
    pub fn failing() -> Self {
        Self {
            inner: Arc::new(Counters {
                fail_start: true,
                ..Counters::default()
            }),
        }
    }

    pub fn start_calls(&self) -> usize {
        self.inner.starts.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.inner.stops.load(Ordering::SeqCst)
    }

    pub fn abort_calls(&self) -> usize {
        self.inner.aborts.load(Ordering::SeqCst)
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&self) -> Result<()> {
        self.inner.starts.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_start {
            return Err(TactileError::Recognizer(
                "recognizer rejected start".to_string(),
            ));
        }
        Ok(())
    }

    fn stop(&self) {
        self.inner.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn abort(&self) {
        self.inner.aborts.fetch_add(1, Ordering::SeqCst);
    }
}
