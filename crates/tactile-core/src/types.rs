use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

/// Unique identifier for a braille practice lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonId(pub Uuid);

impl LessonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LessonId {
    fn default() -> Self {
        Self::new()
    }
}

/// Speech synthesis rate multiplier. Range: 0.5 (half speed) to 2.0 (double).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SpeechRate(pub f32);

impl SpeechRate {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.5, 2.0))
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_datetime_roundtrip() {
        let now = Utc::now();
        let ts = Timestamp::from_datetime(now);
        let dt = ts.to_datetime();
        // Precision is seconds, so compare timestamps
        assert_eq!(dt.timestamp(), now.timestamp());
    }

    #[test]
    fn test_timestamp_serialization_round_trip() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let rt: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, rt);
    }

    #[test]
    fn test_lesson_id_default_is_unique() {
        let id1 = LessonId::default();
        let id2 = LessonId::default();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_speech_rate_clamp() {
        assert_eq!(SpeechRate::new(3.0).0, 2.0);
        assert_eq!(SpeechRate::new(0.1).0, 0.5);
        assert_eq!(SpeechRate::new(1.25).0, 1.25);
    }

    #[test]
    fn test_speech_rate_default() {
        assert_eq!(SpeechRate::default().0, 1.0);
    }
}
