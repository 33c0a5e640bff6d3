use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Tactile application.
///
/// Loaded from `~/.tactile/config.toml` by default. Each section corresponds
/// to a subsystem or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TactileConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl TactileConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TactileConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Default practice text for braille lessons.
    pub lesson_word: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            lesson_word: "hello".to_string(),
        }
    }
}

/// User accessibility preferences.
///
/// Passed explicitly to the engines that consult it. Treated as immutable
/// for the lifetime of a session; a preference change builds a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    /// Master switch for voice navigation and narration.
    pub voice_navigation_enabled: bool,
    /// Whether vibration feedback is delivered.
    pub haptics_enabled: bool,
    /// Verbose narration for screen reader users.
    pub screen_reader_mode: bool,
    /// High contrast rendering hint for UI layers.
    pub high_contrast: bool,
    /// Animation reduction hint for UI layers.
    pub reduce_animations: bool,
    /// Narration rate multiplier. Clamped to 0.5..=2.0 on use.
    pub speech_rate: f32,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            voice_navigation_enabled: false,
            haptics_enabled: true,
            screen_reader_mode: false,
            high_contrast: false,
            reduce_animations: false,
            speech_rate: 1.0,
        }
    }
}

/// Speech recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Recognition language tag (BCP 47).
    pub language: String,
    /// Whether the recognizer keeps listening after each utterance.
    pub continuous: bool,
    /// Whether interim (non-final) transcripts are delivered.
    pub interim_results: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            continuous: false,
            interim_results: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TactileConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.lesson_word, "hello");
        assert!(!config.accessibility.voice_navigation_enabled);
        assert!(config.accessibility.haptics_enabled);
        assert_eq!(config.accessibility.speech_rate, 1.0);
        assert_eq!(config.voice.language, "en-US");
        assert!(!config.voice.continuous);
        assert!(config.voice.interim_results);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TactileConfig::default();
        config.accessibility.voice_navigation_enabled = true;
        config.accessibility.speech_rate = 1.5;
        config.general.lesson_word = "braille".to_string();
        config.save(&path).unwrap();

        let loaded = TactileConfig::load(&path).unwrap();
        assert!(loaded.accessibility.voice_navigation_enabled);
        assert_eq!(loaded.accessibility.speech_rate, 1.5);
        assert_eq!(loaded.general.lesson_word, "braille");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        assert!(TactileConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        let config = TactileConfig::load_or_default(&path);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[accessibility]\nvoice_navigation_enabled = true\n").unwrap();

        let config = TactileConfig::load(&path).unwrap();
        assert!(config.accessibility.voice_navigation_enabled);
        // Untouched sections fall back to defaults
        assert!(config.accessibility.haptics_enabled);
        assert_eq!(config.voice.language, "en-US");
        assert_eq!(config.general.lesson_word, "hello");
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "general = [[[").unwrap();
        assert!(TactileConfig::load(&path).is_err());
    }
}
