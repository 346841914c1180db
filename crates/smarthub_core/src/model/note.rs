//! Note record for the notes tool.
//!
//! # Invariants
//! - `color` is drawn once at creation and never changes afterwards.

use super::{require_text, Record, RecordValidationError};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed note background palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Pink,
    Blue,
    Purple,
    Green,
    Yellow,
}

impl NoteColor {
    pub const PALETTE: [NoteColor; 5] = [
        NoteColor::Pink,
        NoteColor::Blue,
        NoteColor::Purple,
        NoteColor::Green,
        NoteColor::Yellow,
    ];

    /// Picks a palette entry uniformly at random.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::PALETTE.choose(rng).unwrap_or(&NoteColor::Yellow)
    }

    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Author name.
    pub user_name: String,
    pub color: NoteColor,
}

impl Record for Note {
    const KIND: &'static str = "note";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::KIND, "id", &self.id)?;
        require_text(Self::KIND, "title", &self.title)?;
        require_text(Self::KIND, "content", &self.content)?;
        require_text(Self::KIND, "userName", &self.user_name)?;
        Ok(())
    }
}
