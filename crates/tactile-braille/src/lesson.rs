//! Braille practice lesson engine.
//!
//! Drives a per-character practice loop over a target text: the learner
//! enters dots with the home-row keys, checks the pattern against the
//! expected cell, and advances through the text word by word. Narration
//! and vibration are delivered through the injected capability ports and
//! gated by the accessibility preferences.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use tactile_core::config::AccessibilityConfig;
use tactile_core::events::DomainEvent;
use tactile_core::feedback::{HapticMotor, Narrator};
use tactile_core::types::{LessonId, SpeechRate, Timestamp};

use crate::cell::describe;
use crate::encode::{transliterate, BrailleWord};
use crate::haptic::haptic_pattern;
use crate::keys::{dot_for_key, validate};
use crate::BrailleChar;

/// Vibration cue when a dot is entered.
pub const DOT_ENTERED_PATTERN: [u64; 1] = [30];
/// Vibration cue when a dot is removed or the pattern is cleared.
pub const DOT_REMOVED_PATTERN: [u64; 1] = [20];
/// Vibration pattern for a correct answer.
pub const CORRECT_PATTERN: [u64; 5] = [50, 30, 50, 30, 50];
/// Vibration pattern for an incorrect answer.
pub const INCORRECT_PATTERN: [u64; 3] = [100, 50, 100];

/// Result of checking the learner's input against the expected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Input matched; the lesson advanced to the next character.
    Correct,
    /// Input did not match; the input is kept for correction.
    Incorrect,
}

/// Cursor state for a practice run over a piece of text.
///
/// Pure state with no capability access; `LessonEngine` wraps it with
/// narration, haptics, and event emission.
#[derive(Debug, Clone)]
pub struct LessonSession {
    pub id: LessonId,
    pub started_at: DateTime<Utc>,
    words: Vec<BrailleWord>,
    word_index: usize,
    char_index: usize,
    input: Vec<u8>,
    score: usize,
    total: usize,
}

impl LessonSession {
    /// Create a session positioned at the first character of the text.
    pub fn new(text: &str) -> Self {
        let words = transliterate(text);
        let total = words.iter().map(|w| w.characters.len()).sum();
        let mut session = Self {
            id: LessonId::new(),
            started_at: Utc::now(),
            words,
            word_index: 0,
            char_index: 0,
            input: Vec::new(),
            score: 0,
            total,
        };
        session.align();
        session
    }

    /// Skip past exhausted and zero-length words.
    fn align(&mut self) {
        while self.word_index < self.words.len()
            && self.char_index >= self.words[self.word_index].characters.len()
        {
            self.word_index += 1;
            self.char_index = 0;
        }
    }

    pub fn words(&self) -> &[BrailleWord] {
        &self.words
    }

    pub fn current_word(&self) -> Option<&BrailleWord> {
        self.words.get(self.word_index)
    }

    /// The cell the learner is currently practicing. `None` once every
    /// character has been answered.
    pub fn current_char(&self) -> Option<&BrailleChar> {
        self.words
            .get(self.word_index)
            .and_then(|w| w.characters.get(self.char_index))
    }

    pub fn is_complete(&self) -> bool {
        self.word_index >= self.words.len()
    }

    /// Current word position as (1-based index, word count).
    pub fn word_progress(&self) -> (usize, usize) {
        ((self.word_index + 1).min(self.words.len()), self.words.len())
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Append a dot, keeping the input sorted.
    pub fn push_dot(&mut self, dot: u8) {
        self.input.push(dot);
        self.input.sort_unstable();
    }

    /// Remove the last dot of the sorted pattern (the highest); returns it.
    pub fn pop_dot(&mut self) -> Option<u8> {
        self.input.pop()
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Check the input against the current cell. On a correct answer the
    /// input is cleared and the cursor advances. Returns `None` once the
    /// lesson is complete.
    pub fn check_current(&mut self) -> Option<CheckOutcome> {
        let expected = self.current_char()?.dots.clone();
        if validate(&self.input, &expected) {
            self.score += 1;
            self.input.clear();
            self.char_index += 1;
            self.align();
            Some(CheckOutcome::Correct)
        } else {
            Some(CheckOutcome::Incorrect)
        }
    }
}

/// The lesson engine wraps a session with feedback delivery.
///
/// Narration respects `voice_navigation_enabled`, vibration respects
/// `haptics_enabled`. State changes are broadcast as domain events when an
/// event channel is attached.
pub struct LessonEngine {
    session: Mutex<LessonSession>,
    prefs: AccessibilityConfig,
    narrator: Arc<dyn Narrator>,
    motor: Arc<dyn HapticMotor>,
    events: Option<broadcast::Sender<DomainEvent>>,
}

impl std::fmt::Debug for LessonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonEngine")
            .field("session", &self.session)
            .field("prefs", &self.prefs)
            .field("has_events", &self.events.is_some())
            .finish()
    }
}

impl LessonEngine {
    /// Create an engine over the given text without an event channel.
    pub fn new(
        text: &str,
        prefs: AccessibilityConfig,
        narrator: Arc<dyn Narrator>,
        motor: Arc<dyn HapticMotor>,
    ) -> Self {
        Self::build(text, prefs, narrator, motor, None)
    }

    /// Create an engine that broadcasts domain events on the given channel.
    pub fn with_events(
        text: &str,
        prefs: AccessibilityConfig,
        narrator: Arc<dyn Narrator>,
        motor: Arc<dyn HapticMotor>,
        events: broadcast::Sender<DomainEvent>,
    ) -> Self {
        Self::build(text, prefs, narrator, motor, Some(events))
    }

    fn build(
        text: &str,
        prefs: AccessibilityConfig,
        narrator: Arc<dyn Narrator>,
        motor: Arc<dyn HapticMotor>,
        events: Option<broadcast::Sender<DomainEvent>>,
    ) -> Self {
        let session = LessonSession::new(text);
        tracing::info!(
            lesson_id = %session.id.0,
            words = session.words.len(),
            characters = session.total,
            "Practice lesson started"
        );

        let engine = Self {
            session: Mutex::new(session),
            prefs,
            narrator,
            motor,
            events,
        };
        let (lesson_id, word_count) = {
            let session = engine.lock();
            (session.id, session.words.len())
        };
        engine.emit(DomainEvent::LessonStarted {
            lesson_id: lesson_id.0,
            word_count,
            timestamp: Timestamp::now(),
        });
        engine
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LessonSession> {
        self.session.lock().expect("lesson mutex poisoned")
    }

    fn narrate(&self, text: &str) {
        if self.prefs.voice_navigation_enabled {
            self.narrator
                .speak(text, SpeechRate::new(self.prefs.speech_rate).0);
        }
    }

    fn buzz(&self, pattern: &[u64]) {
        if self.prefs.haptics_enabled {
            self.motor.vibrate(pattern);
        }
    }

    fn emit(&self, event: DomainEvent) {
        if let Some(tx) = &self.events {
            // A send only fails with no live receivers; that is fine.
            let _ = tx.send(event);
        }
    }

    /// Enter the dot mapped to `key`. Keys outside the mapping and input
    /// after completion are ignored.
    pub fn press_key(&self, key: char) -> Option<u8> {
        let dot = dot_for_key(key)?;
        let lesson_id = {
            let mut session = self.lock();
            if session.is_complete() {
                return None;
            }
            session.push_dot(dot);
            session.id
        };

        self.buzz(&DOT_ENTERED_PATTERN);
        self.narrate(&format!("Dot {} entered", dot));
        self.emit(DomainEvent::DotEntered {
            lesson_id: lesson_id.0,
            dot,
            timestamp: Timestamp::now(),
        });
        tracing::debug!(dot, "Dot entered");
        Some(dot)
    }

    /// Remove the last dot from the input.
    pub fn erase_dot(&self) -> Option<u8> {
        let dot = self.lock().pop_dot()?;
        self.buzz(&DOT_REMOVED_PATTERN);
        self.narrate("Dot removed");
        Some(dot)
    }

    /// Discard the whole input pattern.
    pub fn clear_input(&self) {
        self.lock().clear_input();
        self.buzz(&DOT_REMOVED_PATTERN);
        self.narrate("Pattern cleared");
    }

    /// Check the input against the current cell. Returns `None` once the
    /// lesson is complete.
    pub fn check(&self) -> Option<CheckOutcome> {
        let (outcome, lesson_id, completed, score, total) = {
            let mut session = self.lock();
            let outcome = session.check_current()?;
            (
                outcome,
                session.id,
                session.is_complete(),
                session.score(),
                session.total(),
            )
        };

        match outcome {
            CheckOutcome::Correct => {
                self.buzz(&CORRECT_PATTERN);
                self.narrate("Correct!");
            }
            CheckOutcome::Incorrect => {
                self.buzz(&INCORRECT_PATTERN);
                self.narrate("Incorrect, try again");
            }
        }
        self.emit(DomainEvent::AnswerChecked {
            lesson_id: lesson_id.0,
            correct: outcome == CheckOutcome::Correct,
            timestamp: Timestamp::now(),
        });

        if completed && outcome == CheckOutcome::Correct {
            tracing::info!(score, total, "Lesson complete");
            self.narrate(&format!("Lesson complete. Score {} of {}", score, total));
            self.emit(DomainEvent::LessonCompleted {
                lesson_id: lesson_id.0,
                score,
                total,
                timestamp: Timestamp::now(),
            });
        }

        Some(outcome)
    }

    /// Narrate the current character and play its cell as vibration.
    pub fn announce_current(&self) {
        let cell = self.lock().current_char().cloned();
        if let Some(cell) = cell {
            self.narrate(&format!(
                "Character: {}. {}",
                cell.character,
                describe(&cell.dots)
            ));
            self.buzz(&haptic_pattern(&cell.dots));
        }
    }

    pub fn is_complete(&self) -> bool {
        self.lock().is_complete()
    }

    pub fn score(&self) -> usize {
        self.lock().score()
    }

    pub fn total(&self) -> usize {
        self.lock().total()
    }

    pub fn input(&self) -> Vec<u8> {
        self.lock().input().to_vec()
    }

    pub fn current_char(&self) -> Option<BrailleChar> {
        self.lock().current_char().cloned()
    }

    pub fn word_progress(&self) -> (usize, usize) {
        self.lock().word_progress()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingNarrator {
        utterances: Mutex<Vec<(String, f32)>>,
    }

    impl RecordingNarrator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                utterances: Mutex::new(Vec::new()),
            })
        }

        fn spoken(&self) -> Vec<String> {
            self.utterances
                .lock()
                .unwrap()
                .iter()
                .map(|(text, _)| text.clone())
                .collect()
        }
    }

    impl Narrator for RecordingNarrator {
        fn speak(&self, text: &str, rate: f32) {
            self.utterances.lock().unwrap().push((text.to_string(), rate));
        }

        fn cancel(&self) {}
    }

    struct RecordingMotor {
        patterns: Mutex<Vec<Vec<u64>>>,
    }

    impl RecordingMotor {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                patterns: Mutex::new(Vec::new()),
            })
        }

        fn felt(&self) -> Vec<Vec<u64>> {
            self.patterns.lock().unwrap().clone()
        }
    }

    impl HapticMotor for RecordingMotor {
        fn vibrate(&self, pattern: &[u64]) {
            self.patterns.lock().unwrap().push(pattern.to_vec());
        }
    }

    fn spoken_prefs() -> AccessibilityConfig {
        AccessibilityConfig {
            voice_navigation_enabled: true,
            ..AccessibilityConfig::default()
        }
    }

    // =========================================================================
    // Session tests
    // =========================================================================

    #[test]
    fn test_session_initial_position() {
        let session = LessonSession::new("hello");
        assert_eq!(session.total(), 5);
        assert_eq!(session.current_char().unwrap().character, 'h');
        assert_eq!(session.word_progress(), (1, 1));
        assert!(!session.is_complete());
    }

    #[test]
    fn test_session_skips_empty_words() {
        // Consecutive spaces encode to zero-length words; the cursor skips them.
        let session = LessonSession::new("  a");
        assert_eq!(session.current_char().unwrap().character, 'a');
        assert_eq!(session.total(), 1);
    }

    #[test]
    fn test_session_all_empty_is_complete() {
        let session = LessonSession::new("   ");
        assert!(session.is_complete());
        assert!(session.current_char().is_none());
    }

    #[test]
    fn test_session_push_dot_keeps_input_sorted() {
        let mut session = LessonSession::new("a");
        session.push_dot(5);
        session.push_dot(1);
        session.push_dot(3);
        assert_eq!(session.input(), &[1, 3, 5]);
    }

    #[test]
    fn test_session_check_correct_advances() {
        let mut session = LessonSession::new("ab");
        session.push_dot(1);
        assert_eq!(session.check_current(), Some(CheckOutcome::Correct));
        assert_eq!(session.score(), 1);
        assert!(session.input().is_empty());
        assert_eq!(session.current_char().unwrap().character, 'b');
    }

    #[test]
    fn test_session_check_incorrect_keeps_input() {
        let mut session = LessonSession::new("a");
        session.push_dot(2);
        assert_eq!(session.check_current(), Some(CheckOutcome::Incorrect));
        assert_eq!(session.score(), 0);
        assert_eq!(session.input(), &[2]);
        assert_eq!(session.current_char().unwrap().character, 'a');
    }

    #[test]
    fn test_session_advances_across_words() {
        let mut session = LessonSession::new("a b");
        session.push_dot(1);
        session.check_current().unwrap();
        assert_eq!(session.current_char().unwrap().character, 'b');
        assert_eq!(session.word_progress(), (2, 2));
    }

    #[test]
    fn test_session_completion() {
        let mut session = LessonSession::new("a");
        session.push_dot(1);
        assert_eq!(session.check_current(), Some(CheckOutcome::Correct));
        assert!(session.is_complete());
        assert!(session.check_current().is_none());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = LessonSession::new("a");
        let b = LessonSession::new("a");
        assert_ne!(a.id, b.id);
    }

    // =========================================================================
    // Engine tests
    // =========================================================================

    #[test]
    fn test_press_key_maps_and_buzzes() {
        let narrator = RecordingNarrator::new();
        let motor = RecordingMotor::new();
        let engine = LessonEngine::new("b", spoken_prefs(), narrator.clone(), motor.clone());

        assert_eq!(engine.press_key('f'), Some(1));
        assert_eq!(engine.press_key('d'), Some(2));
        assert_eq!(engine.input(), vec![1, 2]);
        assert_eq!(motor.felt(), vec![vec![30], vec![30]]);
        assert_eq!(
            narrator.spoken(),
            vec!["Dot 1 entered".to_string(), "Dot 2 entered".to_string()]
        );
    }

    #[test]
    fn test_press_unknown_key_is_ignored() {
        let motor = RecordingMotor::new();
        let engine = LessonEngine::new("b", spoken_prefs(), RecordingNarrator::new(), motor.clone());

        assert_eq!(engine.press_key('x'), None);
        assert!(engine.input().is_empty());
        assert!(motor.felt().is_empty());
    }

    #[test]
    fn test_check_correct_flow() {
        let narrator = RecordingNarrator::new();
        let motor = RecordingMotor::new();
        let engine = LessonEngine::new("ba", spoken_prefs(), narrator.clone(), motor.clone());

        engine.press_key('f');
        engine.press_key('d');
        assert_eq!(engine.check(), Some(CheckOutcome::Correct));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.current_char().unwrap().character, 'a');
        assert!(motor.felt().contains(&vec![50, 30, 50, 30, 50]));
        assert!(narrator.spoken().contains(&"Correct!".to_string()));
    }

    #[test]
    fn test_check_incorrect_flow() {
        let narrator = RecordingNarrator::new();
        let motor = RecordingMotor::new();
        let engine = LessonEngine::new("b", spoken_prefs(), narrator.clone(), motor.clone());

        engine.press_key('f');
        assert_eq!(engine.check(), Some(CheckOutcome::Incorrect));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.input(), vec![1]);
        assert!(motor.felt().contains(&vec![100, 50, 100]));
        assert!(narrator.spoken().contains(&"Incorrect, try again".to_string()));
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let engine = LessonEngine::new(
            "h",
            spoken_prefs(),
            RecordingNarrator::new(),
            RecordingMotor::new(),
        );

        // h is dots 1, 2, 5; enter via k (5), f (1), d (2).
        engine.press_key('k');
        engine.press_key('f');
        engine.press_key('d');
        assert_eq!(engine.check(), Some(CheckOutcome::Correct));
    }

    #[test]
    fn test_lesson_completion_narrates_score() {
        let narrator = RecordingNarrator::new();
        let engine = LessonEngine::new(
            "hi",
            spoken_prefs(),
            narrator.clone(),
            RecordingMotor::new(),
        );

        // h = dots 1,2,5
        engine.press_key('f');
        engine.press_key('d');
        engine.press_key('k');
        assert_eq!(engine.check(), Some(CheckOutcome::Correct));

        // i = dots 2,4
        engine.press_key('d');
        engine.press_key('j');
        assert_eq!(engine.check(), Some(CheckOutcome::Correct));

        assert!(engine.is_complete());
        assert_eq!(engine.score(), 2);
        assert!(narrator
            .spoken()
            .contains(&"Lesson complete. Score 2 of 2".to_string()));

        // Further checks and key presses are inert.
        assert!(engine.check().is_none());
        assert_eq!(engine.press_key('f'), None);
    }

    #[test]
    fn test_erase_and_clear() {
        let narrator = RecordingNarrator::new();
        let motor = RecordingMotor::new();
        let engine = LessonEngine::new("q", spoken_prefs(), narrator.clone(), motor.clone());

        engine.press_key('f');
        engine.press_key('d');
        assert_eq!(engine.erase_dot(), Some(2));
        assert_eq!(engine.input(), vec![1]);

        engine.press_key('s');
        engine.clear_input();
        assert!(engine.input().is_empty());

        assert!(narrator.spoken().contains(&"Dot removed".to_string()));
        assert!(narrator.spoken().contains(&"Pattern cleared".to_string()));
        assert!(motor.felt().contains(&vec![20]));

        // Erasing an empty pattern does nothing.
        assert_eq!(engine.erase_dot(), None);
    }

    #[test]
    fn test_announce_current_plays_cell() {
        let narrator = RecordingNarrator::new();
        let motor = RecordingMotor::new();
        let engine = LessonEngine::new("h", spoken_prefs(), narrator.clone(), motor.clone());

        engine.announce_current();
        assert_eq!(narrator.spoken(), vec!["Character: h. dots 1, 2, 5"]);
        assert_eq!(motor.felt(), vec![vec![50, 30, 50, 30, 50]]);
    }

    #[test]
    fn test_narration_suppressed_when_voice_disabled() {
        let narrator = RecordingNarrator::new();
        let engine = LessonEngine::new(
            "a",
            AccessibilityConfig::default(),
            narrator.clone(),
            RecordingMotor::new(),
        );

        engine.press_key('f');
        engine.check();
        engine.announce_current();
        assert!(narrator.spoken().is_empty());
    }

    #[test]
    fn test_haptics_suppressed_when_disabled() {
        let motor = RecordingMotor::new();
        let prefs = AccessibilityConfig {
            voice_navigation_enabled: true,
            haptics_enabled: false,
            ..AccessibilityConfig::default()
        };
        let engine = LessonEngine::new("a", prefs, RecordingNarrator::new(), motor.clone());

        engine.press_key('f');
        engine.check();
        assert!(motor.felt().is_empty());
    }

    #[test]
    fn test_speech_rate_is_clamped() {
        let narrator = RecordingNarrator::new();
        let prefs = AccessibilityConfig {
            voice_navigation_enabled: true,
            speech_rate: 9.0,
            ..AccessibilityConfig::default()
        };
        let engine = LessonEngine::new("a", prefs, narrator.clone(), RecordingMotor::new());

        engine.press_key('f');
        let rates: Vec<f32> = narrator
            .utterances
            .lock()
            .unwrap()
            .iter()
            .map(|(_, rate)| *rate)
            .collect();
        assert_eq!(rates, vec![2.0]);
    }

    #[test]
    fn test_events_are_broadcast() {
        let (tx, mut rx) = broadcast::channel(32);
        let engine = LessonEngine::with_events(
            "a",
            spoken_prefs(),
            RecordingNarrator::new(),
            RecordingMotor::new(),
            tx,
        );

        engine.press_key('f');
        engine.check();

        let mut names = Vec::new();
        while let Ok(event) = rx.try_recv() {
            names.push(event.event_name());
        }
        assert_eq!(
            names,
            vec![
                "lesson_started",
                "dot_entered",
                "answer_checked",
                "lesson_completed",
            ]
        );
    }

    #[test]
    fn test_event_send_without_receiver_is_harmless() {
        let (tx, rx) = broadcast::channel(4);
        drop(rx);
        let engine = LessonEngine::with_events(
            "a",
            spoken_prefs(),
            RecordingNarrator::new(),
            RecordingMotor::new(),
            tx,
        );
        engine.press_key('f');
        assert_eq!(engine.check(), Some(CheckOutcome::Correct));
    }
}
