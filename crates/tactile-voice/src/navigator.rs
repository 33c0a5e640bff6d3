//! Voice navigation dispatcher.
//!
//! Wraps a platform speech recognizer behind start/stop/toggle controls and
//! matches finalized transcripts against the command table. Matching is
//! first-match-wins in table order: callers wanting longer-phrase
//! precedence must order the table with the more specific phrases first.

use std::sync::Arc;

use tokio::sync::broadcast;

use tactile_core::config::AccessibilityConfig;
use tactile_core::events::DomainEvent;
use tactile_core::feedback::Narrator;
use tactile_core::types::{SpeechRate, Timestamp};

use crate::command::VoiceCommand;
use crate::recognizer::SpeechRecognizer;
use crate::state::{ListeningState, StateMachine};

/// The voice navigator owns the listening state and the dispatch loop.
///
/// The command table and all capabilities are supplied at construction.
/// When no recognizer is bound (the platform has none), the navigator
/// stays permanently Idle: `start_listening` becomes a silent no-op and
/// never raises.
pub struct VoiceNavigator {
    state: StateMachine,
    commands: Vec<VoiceCommand>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    narrator: Arc<dyn Narrator>,
    prefs: AccessibilityConfig,
    events: Option<broadcast::Sender<DomainEvent>>,
}

impl std::fmt::Debug for VoiceNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceNavigator")
            .field("state", &self.state)
            .field("commands", &self.commands)
            .field("has_recognizer", &self.recognizer.is_some())
            .field("prefs", &self.prefs)
            .finish()
    }
}

impl VoiceNavigator {
    /// Create a navigator without an event channel.
    pub fn new(
        commands: Vec<VoiceCommand>,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        narrator: Arc<dyn Narrator>,
        prefs: AccessibilityConfig,
    ) -> Self {
        Self::build(commands, recognizer, narrator, prefs, None)
    }

    /// Create a navigator that broadcasts domain events on the given channel.
    pub fn with_events(
        commands: Vec<VoiceCommand>,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        narrator: Arc<dyn Narrator>,
        prefs: AccessibilityConfig,
        events: broadcast::Sender<DomainEvent>,
    ) -> Self {
        Self::build(commands, recognizer, narrator, prefs, Some(events))
    }

    fn build(
        commands: Vec<VoiceCommand>,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        narrator: Arc<dyn Narrator>,
        prefs: AccessibilityConfig,
        events: Option<broadcast::Sender<DomainEvent>>,
    ) -> Self {
        if recognizer.is_none() {
            tracing::warn!("Speech recognition unavailable; voice navigation stays idle");
        }
        Self {
            state: StateMachine::new(),
            commands,
            recognizer,
            narrator,
            prefs,
            events,
        }
    }

    fn narrate(&self, text: &str) {
        self.narrator
            .speak(text, SpeechRate::new(self.prefs.speech_rate).0);
    }

    fn emit(&self, event: DomainEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    /// Ask the recognizer to start a session.
    ///
    /// With voice navigation disabled this announces the fact and changes
    /// nothing. Without a recognizer it is a silent no-op. The state flips
    /// to Listening only once the recognizer reports its own start.
    pub fn start_listening(&self) {
        if !self.prefs.voice_navigation_enabled {
            self.narrate("Voice navigation is disabled");
            return;
        }

        let recognizer = match &self.recognizer {
            Some(recognizer) => recognizer,
            None => {
                tracing::warn!("Speech recognition unavailable; start ignored");
                return;
            }
        };

        if self.state.current() == ListeningState::Listening {
            return;
        }

        match recognizer.start() {
            Ok(()) => self.narrate("Listening..."),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start speech recognizer");
                self.narrate(&format!("Error: {}", e));
            }
        }
    }

    /// Ask the recognizer to stop. No-op unless currently Listening; the
    /// state flips to Idle once the recognizer reports the stream ended.
    pub fn stop_listening(&self) {
        if self.state.current() != ListeningState::Listening {
            return;
        }
        if let Some(recognizer) = &self.recognizer {
            recognizer.stop();
        }
    }

    /// Drive whichever transition is valid from the current state.
    pub fn toggle_listening(&self) {
        if self.state.current() == ListeningState::Listening {
            self.stop_listening();
        } else {
            self.start_listening();
        }
    }

    pub fn is_listening(&self) -> bool {
        self.state.current() == ListeningState::Listening
    }

    /// Tear down the recognizer session, discarding any pending result,
    /// and force the state back to Idle.
    pub fn shutdown(&self) {
        if let Some(recognizer) = &self.recognizer {
            recognizer.abort();
        }
        self.state.reset();
    }

    /// The recognizer's own start signal.
    pub fn handle_recognizer_started(&self) {
        if self.state.transition(ListeningState::Listening).is_ok() {
            self.emit(DomainEvent::ListeningStarted {
                timestamp: Timestamp::now(),
            });
        }
    }

    /// The recognizer's own end-of-stream signal. Also fires autonomously
    /// when the engine gives up on its own, without `stop_listening`.
    pub fn handle_recognizer_ended(&self) {
        if self.state.transition(ListeningState::Idle).is_ok() {
            self.emit(DomainEvent::ListeningStopped {
                timestamp: Timestamp::now(),
            });
        }
    }

    /// A recognition error from the engine. Recoverable: announced, logged,
    /// and the session continues or ends per the engine's own signals.
    pub fn handle_recognizer_error(&self, error: &str) {
        tracing::warn!(error, "Speech recognition error");
        self.narrate(&format!("Error: {}", error));
    }

    /// A transcript update from the recognizer. Interim results are
    /// ignored; final ones are lowercased and dispatched.
    pub fn handle_transcript(&self, transcript: &str, is_final: bool) {
        if !is_final {
            return;
        }
        self.dispatch(&transcript.to_lowercase());
    }

    /// Scan the command table in order and invoke the first command whose
    /// phrase is a substring of the transcript. Later matches are never
    /// tried. No match produces an audible notice, nothing more.
    fn dispatch(&self, transcript: &str) {
        for command in &self.commands {
            if transcript.contains(command.phrase()) {
                tracing::info!(phrase = command.phrase(), "Voice command dispatched");
                command.invoke();
                self.narrate(&format!("Executing {}", command.description()));
                self.emit(DomainEvent::CommandDispatched {
                    phrase: command.phrase().to_string(),
                    description: command.description().to_string(),
                    timestamp: Timestamp::now(),
                });
                return;
            }
        }

        tracing::debug!(transcript, "No command matched");
        self.narrate("Command not recognized");
        self.emit(DomainEvent::CommandNotRecognized {
            transcript: transcript.to_string(),
            timestamp: Timestamp::now(),
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
