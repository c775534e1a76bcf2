//! Error types surfaced at the boundary of the mind core.
use std::fmt;

/// Failures raised while turning caller-supplied text into core types.
///
/// Core operations themselves are total; only parsing can fail.
#[derive(Debug)]
pub enum MindError {
    UnknownStage { name: String },
    UnknownClingingKind { name: String },
    CharacterParse { source: serde_json::Error },
    ConfigParse { source: toml::de::Error },
}

impl MindError {
    pub fn unknown_stage(name: impl Into<String>) -> Self {
        Self::UnknownStage { name: name.into() }
    }

    pub fn unknown_clinging_kind(name: impl Into<String>) -> Self {
        Self::UnknownClingingKind { name: name.into() }
    }
}

impl fmt::Display for MindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStage { name } => write!(f, "Unknown attainment stage: {}", name),
            Self::UnknownClingingKind { name } => write!(f, "Unknown clinging kind: {}", name),
            Self::CharacterParse { source } => {
                write!(f, "Malformed character snapshot: {}", source)
            }
            Self::ConfigParse { source } => write!(f, "Malformed mind config: {}", source),
        }
    }
}

impl std::error::Error for MindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CharacterParse { source } => Some(source),
            Self::ConfigParse { source } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MindError {
    fn from(source: serde_json::Error) -> Self {
        Self::CharacterParse { source }
    }
}

impl From<toml::de::Error> for MindError {
    fn from(source: toml::de::Error) -> Self {
        Self::ConfigParse { source }
    }
}
