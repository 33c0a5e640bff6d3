//! Voice command navigation.
//!
//! Consumes finalized transcripts from a platform speech recognizer and
//! matches them against a caller-supplied command table, invoking at most
//! one action per utterance. Owns the Idle/Listening state, driven by the
//! navigator API and by the recognizer's own lifecycle signals.

pub mod command;
pub mod navigator;
pub mod recognizer;
pub mod state;

pub use command::{CommandAction, VoiceCommand};
pub use navigator::VoiceNavigator;
pub use recognizer::{ScriptedRecognizer, SpeechRecognizer};
pub use state::{ListeningState, StateMachine};
