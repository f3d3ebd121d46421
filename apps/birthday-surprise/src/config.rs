//! Show settings.
//!
//! Every value has a compiled-in default; the host may override any subset
//! with JSON through `game_configure`. Overrides take effect from the next
//! stage that is entered.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub auth: AuthSettings,
    pub fullscreen: FullscreenSettings,
    pub blackout: BlackoutSettings,
    pub fireworks: FireworksSettings,
    pub hero: HeroSettings,
    pub countdown: CountdownSettings,
    pub memories: MemorySettings,
    pub celebration: CakeSettings,
    pub letter: LetterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub pin: String,
    pub max_attempts: u32,
    pub cooldown_secs: f32,
    /// Pause between the success message and the next stage.
    pub success_delay_secs: f32,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            pin: "020819".to_string(),
            max_attempts: 3,
            cooldown_secs: 30.0,
            success_delay_secs: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenSettings {
    pub enter_delay_secs: f32,
}

impl Default for FullscreenSettings {
    fn default() -> Self {
        Self { enter_delay_secs: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackoutSettings {
    pub hold_secs: f32,
}

impl Default for BlackoutSettings {
    fn default() -> Self {
        Self { hold_secs: 2.0 }
    }
}

/// Timeline of the fireworks stage, in seconds after the script is ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksSettings {
    pub script_url: String,
    pub reveal_at: f32,
    pub reduce_load_at: f32,
    pub finale_at: f32,
    pub finale_bursts: u32,
    pub finale_spacing_secs: f32,
    pub overlay_at: f32,
    pub continue_at: f32,
    /// Pause between releasing the session and leaving the stage.
    pub exit_delay_secs: f32,
}

impl Default for FireworksSettings {
    fn default() -> Self {
        Self {
            script_url: "/diwali/script.js".to_string(),
            reveal_at: 0.12,
            reduce_load_at: 3.6,
            finale_at: 4.0,
            finale_bursts: 3,
            finale_spacing_secs: 0.25,
            overlay_at: 5.0,
            continue_at: 15.0,
            exit_delay_secs: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub reveal_delay_secs: f32,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self { reveal_delay_secs: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    /// Target instant in the viewer's local time, e.g. `"2025-11-12T00:00:00"`.
    pub target: NaiveDateTime,
    /// Pause between reaching zero and the "It's time" message.
    pub arrived_delay_secs: f32,
    /// Pause between the message and leaving the stage.
    pub complete_delay_secs: f32,
}

impl CountdownSettings {
    /// Target as local milliseconds since the epoch (local time read as UTC).
    pub fn target_ms(&self) -> f64 {
        self.target.and_utc().timestamp_millis() as f64
    }
}

fn default_target() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 12)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            target: default_target(),
            arrived_delay_secs: 1.0,
            complete_delay_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySettings {
    pub auto_advance_secs: f32,
    pub confetti_pieces: u32,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            auto_advance_secs: 3.0,
            confetti_pieces: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeSettings {
    pub text_delay_secs: f32,
    pub cake_delay_secs: f32,
    /// Time from the candle going out to leaving the stage.
    pub complete_delay_secs: f32,
    /// Average microphone level (0-255) that counts as blowing.
    pub blow_threshold: f32,
}

impl Default for CakeSettings {
    fn default() -> Self {
        Self {
            text_delay_secs: 0.5,
            cake_delay_secs: 3.0,
            complete_delay_secs: 5.0,
            blow_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterSettings {
    pub chars_per_tick: u32,
    pub tick_secs: f32,
}

impl Default for LetterSettings {
    fn default() -> Self {
        Self {
            chars_per_tick: 2,
            tick_secs: 0.03,
        }
    }
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            auth: AuthSettings::default(),
            fullscreen: FullscreenSettings::default(),
            blackout: BlackoutSettings::default(),
            fireworks: FireworksSettings::default(),
            hero: HeroSettings::default(),
            countdown: CountdownSettings::default(),
            memories: MemorySettings::default(),
            celebration: CakeSettings::default(),
            letter: LetterSettings::default(),
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}

/// Shortest letter tick. Anything faster than one fixed step reveals
/// several ticks per step anyway.
pub const MIN_LETTER_TICK_SECS: f32 = 1.0 / 60.0;

fn at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(ConfigError::TooShort { field, min, value })
    }
}

impl CelebrationConfig {
    /// Parse settings JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pin = &self.auth.pin;
        if pin.len() != 6 || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidPin(pin.clone()));
        }
        if self.auth.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.letter.chars_per_tick == 0 {
            return Err(ConfigError::StalledLetter);
        }

        non_negative("auth.cooldown_secs", self.auth.cooldown_secs)?;
        non_negative("auth.success_delay_secs", self.auth.success_delay_secs)?;
        non_negative("fullscreen.enter_delay_secs", self.fullscreen.enter_delay_secs)?;
        non_negative("blackout.hold_secs", self.blackout.hold_secs)?;

        let fw = &self.fireworks;
        non_negative("fireworks.reveal_at", fw.reveal_at)?;
        non_negative("fireworks.reduce_load_at", fw.reduce_load_at)?;
        non_negative("fireworks.finale_at", fw.finale_at)?;
        non_negative("fireworks.finale_spacing_secs", fw.finale_spacing_secs)?;
        non_negative("fireworks.overlay_at", fw.overlay_at)?;
        non_negative("fireworks.continue_at", fw.continue_at)?;
        non_negative("fireworks.exit_delay_secs", fw.exit_delay_secs)?;

        non_negative("hero.reveal_delay_secs", self.hero.reveal_delay_secs)?;
        non_negative("countdown.arrived_delay_secs", self.countdown.arrived_delay_secs)?;
        non_negative("countdown.complete_delay_secs", self.countdown.complete_delay_secs)?;
        positive("memories.auto_advance_secs", self.memories.auto_advance_secs)?;

        let cake = &self.celebration;
        non_negative("celebration.text_delay_secs", cake.text_delay_secs)?;
        non_negative("celebration.cake_delay_secs", cake.cake_delay_secs)?;
        non_negative("celebration.complete_delay_secs", cake.complete_delay_secs)?;
        non_negative("celebration.blow_threshold", cake.blow_threshold)?;

        at_least("letter.tick_secs", self.letter.tick_secs, MIN_LETTER_TICK_SECS)?;
        Ok(())
    }
}
