//! Reference vocabularies: countries, genres, dubbing and subtitle languages.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// The four lookup tables share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Countries,
    Genres,
    DubbingLanguages,
    SubtitleLanguages,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Countries,
        ReferenceKind::Genres,
        ReferenceKind::DubbingLanguages,
        ReferenceKind::SubtitleLanguages,
    ];

    /// Parse the URL segment used by the HTTP API (`dubbing-languages`, ...).
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "countries" => Some(Self::Countries),
            "genres" => Some(Self::Genres),
            "dubbing-languages" => Some(Self::DubbingLanguages),
            "subtitle-languages" => Some(Self::SubtitleLanguages),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Genres => "genres",
            Self::DubbingLanguages => "dubbing-languages",
            Self::SubtitleLanguages => "subtitle-languages",
        }
    }

    /// Backing table. Only ever one of four fixed identifiers, never user
    /// input, so it is safe to interpolate into SQL.
    pub fn table(self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Genres => "genres",
            Self::DubbingLanguages => "dubbing_languages",
            Self::SubtitleLanguages => "subtitle_languages",
        }
    }

    /// Singular noun for error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Countries => "Country",
            Self::Genres => "Genre",
            Self::DubbingLanguages => "DubbingLanguage",
            Self::SubtitleLanguages => "SubtitleLanguage",
        }
    }
}

/// A row from any of the reference tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferenceItem {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReferenceItem {
    pub name: String,
}
