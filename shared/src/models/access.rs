//! Viewer access levels

use serde::{Deserialize, Serialize};

use super::{BASF_NUNHEMS, UNIGEN_SEEDS, WALLER_HEINZ};

/// Visibility scope of a viewer over breeder data.
///
/// Closed set; anything unrecognised parses to [`AccessLevel::None`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// All breeders, plus the cumulative-yield page
    Total,
    Unigen,
    Nunhems,
    WallerHeinz,
    /// Not authenticated
    #[default]
    None,
}

impl AccessLevel {
    /// Levels that can be persisted, i.e. everything but `None`
    pub const AUTHENTICATED: [AccessLevel; 4] = [
        AccessLevel::Total,
        AccessLevel::Unigen,
        AccessLevel::Nunhems,
        AccessLevel::WallerHeinz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Total => "total",
            AccessLevel::Unigen => "unigen",
            AccessLevel::Nunhems => "nunhems",
            AccessLevel::WallerHeinz => "waller_heinz",
            AccessLevel::None => "none",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::AUTHENTICATED
            .into_iter()
            .find(|level| level.as_str() == value)
            .unwrap_or(AccessLevel::None)
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, AccessLevel::None)
    }

    /// Breeder a single-breeder level is scoped to
    pub fn breeder(&self) -> Option<&'static str> {
        match self {
            AccessLevel::Unigen => Some(UNIGEN_SEEDS),
            AccessLevel::Nunhems => Some(BASF_NUNHEMS),
            AccessLevel::WallerHeinz => Some(WALLER_HEINZ),
            AccessLevel::Total | AccessLevel::None => None,
        }
    }

    /// The cumulative-yield page is only open to full access
    pub fn can_view_cumulative(&self) -> bool {
        matches!(self, AccessLevel::Total)
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::Total => write!(f, "Összes nemesítőház"),
            AccessLevel::None => write!(f, "Nincs hozzáférés"),
            scoped => write!(f, "{}", scoped.breeder().unwrap_or_default()),
        }
    }
}
