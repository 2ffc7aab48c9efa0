//! Breeder table and variety classification

use serde::Serialize;

/// Sentinel breeder for variety codes no breeder claims
pub const UNKNOWN_BREEDER: &str = "Ismeretlen";

/// Colour used for breeders outside the static table
pub const UNKNOWN_BREEDER_COLOR: &str = "#6b7280";

pub const UNIGEN_SEEDS: &str = "Unigen Seeds";
pub const BASF_NUNHEMS: &str = "BASF-Nunhems";
pub const WALLER_HEINZ: &str = "Waller + Heinz";

/// Display name the Heinz varieties carry in the 50-plant Lakitelek subplot
pub const PRESTOMECH_HEINZ: &str = "Prestomech + Heinz";

/// A breeding house owning a closed set of trial varieties
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Breeder {
    pub name: &'static str,
    pub color: &'static str,
    pub varieties: &'static [&'static str],
}

impl Breeder {
    pub fn owns(&self, variety: &str) -> bool {
        self.varieties.contains(&variety)
    }
}

/// Static breeder membership. Order is the dashboard's display order.
pub const BREEDERS: &[Breeder] = &[
    Breeder {
        name: UNIGEN_SEEDS,
        color: "#dc2626",
        varieties: &["UG11227*", "UG8492", "UG17219", "UG1578", "UG13577*"],
    },
    Breeder {
        name: BASF_NUNHEMS,
        color: "#d97706",
        varieties: &[
            "N00541*", "N00530", "N00544", "N00539", "N00339", "N4510", "N00540*",
        ],
    },
    Breeder {
        name: WALLER_HEINZ,
        color: "#1e40af",
        varieties: &["WALLER", "H2123*", "H2239", "H2249", "H1881", "H2127"],
    },
];

/// Resolve the breeder owning a variety code.
///
/// Exact match against each breeder's list, first match wins. Codes nobody
/// claims land in [`UNKNOWN_BREEDER`]; this never fails.
pub fn classify(variety: &str) -> &'static str {
    BREEDERS
        .iter()
        .find(|breeder| breeder.owns(variety))
        .map(|breeder| breeder.name)
        .unwrap_or(UNKNOWN_BREEDER)
}

pub fn breeder_by_name(name: &str) -> Option<&'static Breeder> {
    BREEDERS.iter().find(|breeder| breeder.name == name)
}

/// Chart colour of a breeder, grey for anything not in the table
pub fn breeder_color(name: &str) -> &'static str {
    breeder_by_name(name)
        .map(|breeder| breeder.color)
        .unwrap_or(UNKNOWN_BREEDER_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_varieties() {
        assert_eq!(classify("N00541*"), BASF_NUNHEMS);
        assert_eq!(classify("UG8492"), UNIGEN_SEEDS);
        assert_eq!(classify("WALLER"), WALLER_HEINZ);
        assert_eq!(classify("H2127"), WALLER_HEINZ);
    }

    #[test]
    fn test_classify_is_exact_match() {
        // No trimming or case folding
        assert_eq!(classify("n00541*"), UNKNOWN_BREEDER);
        assert_eq!(classify("N00541"), UNKNOWN_BREEDER);
        assert_eq!(classify(" WALLER"), UNKNOWN_BREEDER);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(""), UNKNOWN_BREEDER);
        assert_eq!(classify("X-999"), UNKNOWN_BREEDER);
    }

    #[test]
    fn test_breeder_color() {
        assert_eq!(breeder_color(BASF_NUNHEMS), "#d97706");
        assert_eq!(breeder_color(UNKNOWN_BREEDER), UNKNOWN_BREEDER_COLOR);
        assert_eq!(breeder_color(PRESTOMECH_HEINZ), UNKNOWN_BREEDER_COLOR);
    }
}
