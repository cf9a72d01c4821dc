use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CardId;

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A vocabulary card from the static catalog.
///
/// Cards are read-only for the lifetime of a session; review state lives in
/// the `ProgressSnapshot`, keyed by `CardId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    word: String,
    pos: String,
    definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<String>,
}

impl Card {
    #[must_use]
    pub fn new(
        id: CardId,
        word: impl Into<String>,
        pos: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            id,
            word: word.into(),
            pos: pos.into(),
            definition: definition.into(),
            image: None,
            audio: None,
            video: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.image = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_audio(mut self, uri: impl Into<String>) -> Self {
        self.audio = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_video(mut self, uri: impl Into<String>) -> Self {
        self.video = Some(uri.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Abbreviated part-of-speech code, e.g. `n` or `adj`.
    #[must_use]
    pub fn pos(&self) -> &str {
        &self.pos
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn audio(&self) -> Option<&str> {
        self.audio.as_deref()
    }

    #[must_use]
    pub fn video(&self) -> Option<&str> {
        self.video.as_deref()
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("card id must not be blank")]
    BlankId,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
