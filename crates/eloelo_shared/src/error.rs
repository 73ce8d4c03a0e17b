use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("Invalid duration {0}")]
    Invalid(String),
    #[error("duration {0} is out of range")]
    Overflow(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StateParseError {
    #[error("invalid history timestamp {value:?} for game {game}: {reason}")]
    Timestamp {
        game: String,
        value: String,
        reason: String,
    },
    #[error("invalid win scale for game {game}: {source}")]
    Scale {
        game: String,
        #[source]
        source: UnknownVariant,
    },
    #[error("malformed ui stream frame: {0}")]
    Frame(#[from] serde_json::Error),
}
