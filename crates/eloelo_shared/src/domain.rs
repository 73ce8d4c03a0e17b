use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(PlayerId);
id_newtype!(GameId);

/// Team side on the board. Serialized in the client's lowercase casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left Team",
            Side::Right => "Right Team",
        }
    }
}

impl FromStr for Side {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(UnknownVariant::new("side", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    #[default]
    AssemblingTeams,
    MatchInProgress,
}

impl GameState {
    pub fn is_assembling(self) -> bool {
        self == GameState::AssemblingTeams
    }
}

/// Outcome margin of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinScale {
    Pwnage,
    Advantage,
    Even,
}

impl WinScale {
    pub const ALL: [WinScale; 3] = [WinScale::Pwnage, WinScale::Advantage, WinScale::Even];

    pub fn as_str(self) -> &'static str {
        match self {
            WinScale::Pwnage => "pwnage",
            WinScale::Advantage => "advantage",
            WinScale::Even => "even",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WinScale::Pwnage => "Pwnage",
            WinScale::Advantage => "Advantage",
            WinScale::Even => "Even",
        }
    }
}

impl FromStr for WinScale {
    type Err = UnknownVariant;

    /// Accepts the client's lowercase casing only; callers normalize first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pwnage" => Ok(WinScale::Pwnage),
            "advantage" => Ok(WinScale::Advantage),
            "even" => Ok(WinScale::Even),
            _ => Err(UnknownVariant::new("win scale", s)),
        }
    }
}

impl fmt::Display for WinScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
