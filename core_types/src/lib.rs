pub mod events;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Platform identifier partitioning catalog entries, e.g.
/// "Nintendo - Super Nintendo Entertainment System".
pub type ScopeId = String;

#[derive(Debug, Clone)]
pub enum CoreTypeError {
    ConversionError(String),
}

impl std::fmt::Display for CoreTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreTypeError::ConversionError(msg) => write!(f, "Conversion Error: {}", msg),
        }
    }
}

/// Result of resolving a loose title: the best available localized text and
/// the standardized reference name used as artifact lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitlePair {
    pub localized: String,
    pub reference: String,
}

impl TitlePair {
    pub fn new(localized: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            localized: localized.into(),
            reference: reference.into(),
        }
    }

    /// Pair used when nothing matched: the raw input stands in for both names.
    pub fn unresolved(raw: &str) -> Self {
        Self::new(raw, raw)
    }

    pub fn is_unchanged_from(&self, raw: &str) -> bool {
        self.localized == raw && self.reference == raw
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub canonical_name: String,
    pub localized_name: String,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, EnumIter, Display)]
pub enum ThumbnailKind {
    #[strum(serialize = "Named_Boxarts")]
    Boxart,
    #[strum(serialize = "Named_Snaps")]
    Snap,
    #[strum(serialize = "Named_Titles")]
    Title,
}

impl ThumbnailKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            ThumbnailKind::Boxart => "Named_Boxarts",
            ThumbnailKind::Snap => "Named_Snaps",
            ThumbnailKind::Title => "Named_Titles",
        }
    }
}

impl TryFrom<&str> for ThumbnailKind {
    type Error = CoreTypeError;
    fn try_from(value: &str) -> Result<Self, CoreTypeError> {
        match value {
            "Named_Boxarts" => Ok(ThumbnailKind::Boxart),
            "Named_Snaps" => Ok(ThumbnailKind::Snap),
            "Named_Titles" => Ok(ThumbnailKind::Title),
            other => Err(CoreTypeError::ConversionError(format!(
                "Unknown thumbnail directory: {}",
                other
            ))),
        }
    }
}
