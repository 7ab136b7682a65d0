//! Session configuration. One session type covers both the image game and the
//! text (optionally morphing) game; everything that differed between them is a
//! field here.

use crate::bank::{IMAGE_ASSET_COUNT, WordBank};
use crate::error::{ConfigError, Result};

/// How items are put on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Presentation {
    /// Numbered asset folders: morph GIF prompt, photo quadrants.
    #[default]
    Image,
    /// Word pairs rendered as text.
    Text,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub round_secs: f64,
    pub total_rounds: u32,
    pub tick_ms: u32,
    pub feedback_delay_ms: u32,
    /// Crossfade the prompt into its translation as the round runs down.
    pub reveal_morph: bool,
    pub presentation: Presentation,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_secs: 7.0,
            total_rounds: 20,
            tick_ms: 100,
            feedback_delay_ms: 2000,
            reveal_morph: false,
            presentation: Presentation::Image,
        }
    }
}

impl SessionConfig {
    pub fn with_total_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = rounds;
        self
    }

    pub fn with_round_secs(mut self, secs: f64) -> Self {
        self.round_secs = secs;
        self
    }

    pub fn with_reveal_morph(mut self, enabled: bool) -> Self {
        self.reveal_morph = enabled;
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: SessionConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if !self.round_secs.is_finite() || self.round_secs <= self.tick_secs() {
            return Err(ConfigError::BadRoundDuration(self.round_secs));
        }
        Ok(())
    }

    pub fn tick_secs(&self) -> f64 {
        self.tick_ms as f64 / 1000.0
    }

    /// Built-in bank matching the presentation.
    pub fn default_bank(&self) -> Result<WordBank> {
        match self.presentation {
            Presentation::Image => WordBank::numbered_assets(IMAGE_ASSET_COUNT),
            Presentation::Text => WordBank::cognates(),
        }
    }
}
