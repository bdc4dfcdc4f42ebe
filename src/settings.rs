//! Global game settings
//!
//! Difficulty, start time and audio toggle shared by every room. Sent to the
//! device together with the room list.

use crate::consts::{DEFAULT_DIFFICULTY, DEFAULT_START_TIME, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Audio mode. The device encodes "on" as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioMode {
    #[default]
    On,
    Off,
}

impl AudioMode {
    pub const ALL: [AudioMode; 2] = [AudioMode::On, AudioMode::Off];

    pub fn code(self) -> u8 {
        match self {
            AudioMode::On => 0,
            AudioMode::Off => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AudioMode::On),
            1 => Some(AudioMode::Off),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AudioMode::On => "Aan",
            AudioMode::Off => "Uit",
        }
    }
}

/// Penalty level, 1 (lenient) to 5 (harsh)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Returns `None` outside 1..=5
    pub fn new(level: u8) -> Option<Self> {
        (MIN_DIFFICULTY..=MAX_DIFFICULTY)
            .contains(&level)
            .then_some(Self(level))
    }

    /// Clamp any integer into the valid range
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// What a wrong answer costs at this level
    pub fn penalty(self) -> &'static str {
        match self.0 {
            1 => "-1 min, spel gaat door",
            2 => "-5 min, spel gaat door",
            3 => "-5 min, spel stopt bij 0",
            4 => "-15 min, spel stopt bij 0",
            _ => "resterende tijd /2, spel stopt bij 0",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

/// Game-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSettings {
    pub difficulty: Difficulty,
    /// Seconds on the clock at start; `None` while the field is left empty
    pub start_time_seconds: Option<u32>,
    pub audio: AudioMode,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            start_time_seconds: Some(DEFAULT_START_TIME),
            audio: AudioMode::On,
        }
    }
}

impl GlobalSettings {
    /// Start time as shown in the form field
    pub fn start_time_text(&self) -> String {
        self.start_time_seconds
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.difficulty.level(), 2);
        assert_eq!(settings.start_time_seconds, Some(60));
        assert_eq!(settings.audio, AudioMode::On);
        assert_eq!(settings.audio.code(), 0);
    }

    #[test]
    fn test_difficulty_bounds() {
        assert!(Difficulty::new(0).is_none());
        assert!(Difficulty::new(6).is_none());
        assert_eq!(Difficulty::new(5).map(Difficulty::level), Some(5));
        assert_eq!(Difficulty::clamped(-4).level(), 1);
        assert_eq!(Difficulty::clamped(99).level(), 5);
    }

    #[test]
    fn test_audio_codes() {
        assert_eq!(AudioMode::from_code(1), Some(AudioMode::Off));
        assert_eq!(AudioMode::from_code(2), None);
        assert_eq!(AudioMode::Off.label(), "Uit");
    }

    #[test]
    fn test_start_time_text() {
        let mut settings = GlobalSettings::default();
        assert_eq!(settings.start_time_text(), "60");
        settings.start_time_seconds = None;
        assert_eq!(settings.start_time_text(), "");
    }
}
