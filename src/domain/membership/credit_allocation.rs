//! Tier-based credit allocation table.
//!
//! Defines how many credits of each type a tier receives per cycle.

use super::Tier;
use serde::{Deserialize, Serialize};

/// Kind of credit a member can redeem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    /// Group class booking.
    Class,
    /// Red-light therapy session.
    RedLight,
    /// Dry cryotherapy session.
    DryCryo,
}

impl CreditType {
    /// All credit types in grant order.
    pub const ALL: [CreditType; 3] = [CreditType::Class, CreditType::RedLight, CreditType::DryCryo];

    /// Stored identifier of this credit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditType::Class => "class",
            CreditType::RedLight => "red_light",
            CreditType::DryCryo => "dry_cryo",
        }
    }
}

impl std::fmt::Display for CreditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credits granted per cycle for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAllocation {
    /// The tier these credits apply to.
    pub tier: Tier,
    pub class: u32,
    pub red_light: u32,
    pub dry_cryo: u32,
}

impl CreditAllocation {
    /// Get the allocation for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Class | Red light | Dry cryo |
    /// |------|-------|-----------|----------|
    /// | Silver | 0 | 0 | 0 |
    /// | Gold | 0 | 4 | 2 |
    /// | Platinum | 4 | 8 | 4 |
    /// | Diamond | 10 | 10 | 6 |
    pub const fn for_tier(tier: Tier) -> Self {
        let (class, red_light, dry_cryo) = match tier {
            Tier::Silver => (0, 0, 0),
            Tier::Gold => (0, 4, 2),
            Tier::Platinum => (4, 8, 4),
            Tier::Diamond => (10, 10, 6),
        };
        Self {
            tier,
            class,
            red_light,
            dry_cryo,
        }
    }

    /// Credits of the given type.
    pub fn credits_for(&self, credit_type: CreditType) -> u32 {
        match credit_type {
            CreditType::Class => self.class,
            CreditType::RedLight => self.red_light,
            CreditType::DryCryo => self.dry_cryo,
        }
    }

    /// Non-zero allocations in grant order (class, red light, dry cryo).
    pub fn granted(&self) -> impl Iterator<Item = (CreditType, u32)> + '_ {
        CreditType::ALL
            .into_iter()
            .map(move |credit_type| (credit_type, self.credits_for(credit_type)))
            .filter(|(_, credits)| *credits > 0)
    }

    /// True when the tier grants nothing.
    pub fn is_empty(&self) -> bool {
        self.granted().next().is_none()
    }
}
