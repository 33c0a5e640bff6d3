//! Voice command table entries.

use std::fmt;

/// A zero-argument side-effecting action bound to a trigger phrase.
pub type CommandAction = Box<dyn Fn() + Send + Sync>;

/// One entry of the command table: trigger phrase, a label for narration
/// and UI display, and the action to invoke on a match.
///
/// Supplied by the caller; the dispatcher only reads it. Matching is
/// substring-based over lowercased transcripts, so the phrase is
/// lowercased on construction.
pub struct VoiceCommand {
    phrase: String,
    description: String,
    action: CommandAction,
}

impl VoiceCommand {
    pub fn new(
        phrase: impl Into<String>,
        description: impl Into<String>,
        action: CommandAction,
    ) -> Self {
        Self {
            phrase: phrase.into().to_lowercase(),
            description: description.into(),
            action,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn invoke(&self) {
        (self.action)()
    }
}

impl fmt::Debug for VoiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCommand")
            .field("phrase", &self.phrase)
            .field("description", &self.description)
            .finish()
    }
}
