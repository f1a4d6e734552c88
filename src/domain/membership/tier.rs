//! Membership tier definitions.
//!
//! Tier labels arrive from signup forms, the payment processor and imported
//! member records, and are formatted inconsistently ("Gold", "GOLD membership",
//! "diamond-annual"). Resolution is therefore permissive and total.

use serde::{Deserialize, Serialize};

/// Membership tier.
///
/// Determines credit allocation and pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Entry tier - studio access only, no bundled credits.
    #[default]
    Silver,
    /// Recovery credits, no classes.
    Gold,
    /// Classes plus recovery credits.
    Platinum,
    /// Top tier. Not sold to the men's catalog.
    Diamond,
}

impl Tier {
    /// All tiers, lowest to highest.
    pub const ALL: [Tier; 4] = [Tier::Silver, Tier::Gold, Tier::Platinum, Tier::Diamond];

    /// Resolves a free-text tier label to a canonical tier.
    ///
    /// Case-insensitive substring match in priority order
    /// diamond, platinum, gold. Anything else is silver.
    pub fn resolve(label: &str) -> Tier {
        let label = label.to_lowercase();
        if label.contains("diamond") {
            Tier::Diamond
        } else if label.contains("platinum") {
            Tier::Platinum
        } else if label.contains("gold") {
            Tier::Gold
        } else {
            Tier::Silver
        }
    }

    /// Canonical lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::Diamond => "diamond",
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolves a free-text tier label. Never fails; unknown labels are silver.
pub fn resolve_tier(label: &str) -> Tier {
    Tier::resolve(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn resolves_plain_names() {
        assert_eq!(resolve_tier("silver"), Tier::Silver);
        assert_eq!(resolve_tier("gold"), Tier::Gold);
        assert_eq!(resolve_tier("platinum"), Tier::Platinum);
        assert_eq!(resolve_tier("diamond"), Tier::Diamond);
    }

    #[test]
    fn resolves_case_insensitively_with_trailing_words() {
        assert_eq!(resolve_tier("Gold Membership"), Tier::Gold);
        assert_eq!(resolve_tier("PLATINUM MEMBERSHIP"), Tier::Platinum);
        assert_eq!(resolve_tier("Diamond membership"), Tier::Diamond);
        assert_eq!(resolve_tier("  silver Membership "), Tier::Silver);
    }

    #[test]
    fn diamond_wins_over_lower_tiers() {
        assert_eq!(resolve_tier("gold to diamond upgrade"), Tier::Diamond);
        assert_eq!(resolve_tier("platinum gold"), Tier::Platinum);
    }

    #[test]
    fn unknown_labels_default_to_silver() {
        assert_eq!(resolve_tier(""), Tier::Silver);
        assert_eq!(resolve_tier("bronze"), Tier::Silver);
        assert_eq!(resolve_tier("Membership"), Tier::Silver);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Platinum).unwrap(), "\"platinum\"");
        let tier: Tier = serde_json::from_str("\"diamond\"").unwrap();
        assert_eq!(tier, Tier::Diamond);
    }

    proptest! {
        #[test]
        fn resolve_never_panics(label in ".*") {
            let _ = resolve_tier(&label);
        }

        #[test]
        fn labels_without_tier_words_are_silver(label in "[a-c0-9 ]{0,24}") {
            prop_assert_eq!(resolve_tier(&label), Tier::Silver);
        }

        #[test]
        fn canonical_name_with_suffix_resolves(idx in 0usize..4, upper in any::<bool>()) {
            let tier = Tier::ALL[idx];
            let mut label = format!("{} Membership", tier.as_str());
            if upper {
                label = label.to_uppercase();
            }
            prop_assert_eq!(resolve_tier(&label), tier);
        }
    }
}
