use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// All domain events that can occur in the Tactile system.
///
/// Events are emitted by the lesson engine and the voice navigator after
/// state changes and consumed by the application's event log task.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DomainEvent {
    // =========================================================================
    // Lesson Events
    // =========================================================================
    /// A braille practice lesson was started.
    LessonStarted {
        lesson_id: Uuid,
        word_count: usize,
        timestamp: Timestamp,
    },

    /// The learner entered a dot into the current input pattern.
    DotEntered {
        lesson_id: Uuid,
        dot: u8,
        timestamp: Timestamp,
    },

    /// The learner's input pattern was checked against the expected cell.
    AnswerChecked {
        lesson_id: Uuid,
        correct: bool,
        timestamp: Timestamp,
    },

    /// All characters in the lesson were answered correctly.
    LessonCompleted {
        lesson_id: Uuid,
        score: usize,
        total: usize,
        timestamp: Timestamp,
    },

    // =========================================================================
    // Voice Navigation Events
    // =========================================================================
    /// The speech recognizer signalled that it started listening.
    ListeningStarted { timestamp: Timestamp },

    /// The speech recognizer signalled end of the utterance stream.
    ListeningStopped { timestamp: Timestamp },

    /// A final transcript matched a command and its action was invoked.
    CommandDispatched {
        phrase: String,
        description: String,
        timestamp: Timestamp,
    },

    /// A final transcript matched no command in the table.
    CommandNotRecognized {
        transcript: String,
        timestamp: Timestamp,
    },

    // =========================================================================
    // Application Lifecycle Events
    // =========================================================================
    /// Application started successfully.
    ApplicationStarted {
        version: String,
        timestamp: Timestamp,
    },
}

impl DomainEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            DomainEvent::LessonStarted { timestamp, .. }
            | DomainEvent::DotEntered { timestamp, .. }
            | DomainEvent::AnswerChecked { timestamp, .. }
            | DomainEvent::LessonCompleted { timestamp, .. }
            | DomainEvent::ListeningStarted { timestamp }
            | DomainEvent::ListeningStopped { timestamp }
            | DomainEvent::CommandDispatched { timestamp, .. }
            | DomainEvent::CommandNotRecognized { timestamp, .. }
            | DomainEvent::ApplicationStarted { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a stable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            DomainEvent::LessonStarted { .. } => "lesson_started",
            DomainEvent::DotEntered { .. } => "dot_entered",
            DomainEvent::AnswerChecked { .. } => "answer_checked",
            DomainEvent::LessonCompleted { .. } => "lesson_completed",
            DomainEvent::ListeningStarted { .. } => "listening_started",
            DomainEvent::ListeningStopped { .. } => "listening_stopped",
            DomainEvent::CommandDispatched { .. } => "command_dispatched",
            DomainEvent::CommandNotRecognized { .. } => "command_not_recognized",
            DomainEvent::ApplicationStarted { .. } => "application_started",
        }
    }
}
