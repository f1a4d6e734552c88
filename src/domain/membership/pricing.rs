//! Static price catalog.
//!
//! Maps (tier, billing type, gender) to the payment processor's price
//! identifiers and amounts. Lookups are total: a combination the club does not
//! sell resolves to `None`, which callers treat as "offering unavailable".
//!
//! Diamond is not sold in the men's catalog. Diamond credit allocation does
//! not depend on gender; only pricing is gender-specific.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{resolve_tier, Tier};

/// Payment frequency for a membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingType {
    #[default]
    Monthly,
    Annual,
}

/// Catalog variant a membership is sold under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Women,
    Men,
}

/// One catalog price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceEntry {
    /// Payment processor price identifier.
    pub price_id: &'static str,
    /// Amount in cents.
    pub amount_cents: i64,
}

const fn price(price_id: &'static str, amount_cents: i64) -> PriceEntry {
    PriceEntry {
        price_id,
        amount_cents,
    }
}

/// Recurring membership prices.
static MEMBERSHIP_PRICES: Lazy<HashMap<(Tier, BillingType, Gender), PriceEntry>> = Lazy::new(|| {
    use BillingType::*;
    use Gender::*;
    use Tier::*;
    HashMap::from([
        ((Silver, Monthly, Women), price("price_silver_monthly_women", 9_900)),
        ((Silver, Annual, Women), price("price_silver_annual_women", 99_000)),
        ((Gold, Monthly, Women), price("price_gold_monthly_women", 14_900)),
        ((Gold, Annual, Women), price("price_gold_annual_women", 149_000)),
        ((Platinum, Monthly, Women), price("price_platinum_monthly_women", 19_900)),
        ((Platinum, Annual, Women), price("price_platinum_annual_women", 199_000)),
        ((Diamond, Monthly, Women), price("price_diamond_monthly_women", 27_900)),
        ((Diamond, Annual, Women), price("price_diamond_annual_women", 279_000)),
        ((Silver, Monthly, Men), price("price_silver_monthly_men", 9_900)),
        ((Silver, Annual, Men), price("price_silver_annual_men", 99_000)),
        ((Gold, Monthly, Men), price("price_gold_monthly_men", 14_900)),
        ((Gold, Annual, Men), price("price_gold_annual_men", 149_000)),
        ((Platinum, Monthly, Men), price("price_platinum_monthly_men", 19_900)),
        ((Platinum, Annual, Men), price("price_platinum_annual_men", 199_000)),
    ])
});

/// One-off yearly fee charged alongside the membership.
static ANNUAL_FEE_PRICES: Lazy<HashMap<(Tier, Gender), PriceEntry>> = Lazy::new(|| {
    use Gender::*;
    use Tier::*;
    HashMap::from([
        ((Silver, Women), price("price_annual_fee_silver_women", 2_900)),
        ((Gold, Women), price("price_annual_fee_gold_women", 3_900)),
        ((Platinum, Women), price("price_annual_fee_platinum_women", 4_900)),
        ((Diamond, Women), price("price_annual_fee_diamond_women", 5_900)),
        ((Silver, Men), price("price_annual_fee_silver_men", 2_900)),
        ((Gold, Men), price("price_annual_fee_gold_men", 3_900)),
        ((Platinum, Men), price("price_annual_fee_platinum_men", 4_900)),
    ])
});

/// Drop-in class pass, discounted for higher tiers.
static CLASS_PASS_PRICES: Lazy<HashMap<(Tier, Gender), PriceEntry>> = Lazy::new(|| {
    use Gender::*;
    use Tier::*;
    HashMap::from([
        ((Silver, Women), price("price_class_pass_silver_women", 2_500)),
        ((Gold, Women), price("price_class_pass_gold_women", 2_000)),
        ((Platinum, Women), price("price_class_pass_platinum_women", 1_500)),
        ((Diamond, Women), price("price_class_pass_diamond_women", 1_000)),
        ((Silver, Men), price("price_class_pass_silver_men", 2_500)),
        ((Gold, Men), price("price_class_pass_gold_men", 2_000)),
        ((Platinum, Men), price("price_class_pass_platinum_men", 1_500)),
    ])
});

/// Membership price for the combination, `None` if not offered.
pub fn membership_price(tier: Tier, billing: BillingType, gender: Gender) -> Option<PriceEntry> {
    MEMBERSHIP_PRICES.get(&(tier, billing, gender)).copied()
}

/// Membership price identifier, `None` if not offered.
pub fn membership_price_id(tier: Tier, billing: BillingType, gender: Gender) -> Option<&'static str> {
    membership_price(tier, billing, gender).map(|entry| entry.price_id)
}

/// Membership price identifier from free-text labels, normalized first.
///
/// `membership_price_id_for("diamond", "monthly", "men")` is `None`.
pub fn membership_price_id_for(tier_label: &str, billing_label: &str, gender_label: &str) -> Option<&'static str> {
    membership_price_id(
        normalize_tier_name(tier_label),
        normalize_billing_type(billing_label),
        normalize_gender(gender_label),
    )
}

/// Annual fee price for the combination, `None` if not offered.
pub fn annual_fee_price(tier: Tier, gender: Gender) -> Option<PriceEntry> {
    ANNUAL_FEE_PRICES.get(&(tier, gender)).copied()
}

/// Annual fee price identifier, `None` if not offered.
pub fn annual_fee_price_id(tier: Tier, gender: Gender) -> Option<&'static str> {
    annual_fee_price(tier, gender).map(|entry| entry.price_id)
}

/// Class pass price for the combination, `None` if not offered.
pub fn class_pass_price(tier: Tier, gender: Gender) -> Option<PriceEntry> {
    CLASS_PASS_PRICES.get(&(tier, gender)).copied()
}

/// Class pass price identifier, `None` if not offered.
pub fn class_pass_price_id(tier: Tier, gender: Gender) -> Option<&'static str> {
    class_pass_price(tier, gender).map(|entry| entry.price_id)
}

/// Normalizes a free-text tier name. Unknown names are silver.
pub fn normalize_tier_name(label: &str) -> Tier {
    resolve_tier(label)
}

const WOMEN_WORDS: &[&str] = &["women", "womens", "woman", "female", "ladies"];
const MEN_WORDS: &[&str] = &["men", "mens", "man", "male"];

/// Normalizes a free-text gender label. Anything not recognised as men is women.
///
/// Matches whole words, so "Men's" is men but "mentor" is not.
pub fn normalize_gender(label: &str) -> Gender {
    let label = label.to_lowercase();
    let words: Vec<&str> = label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has_any = |vocabulary: &[&str]| words.iter().any(|w| vocabulary.contains(w));

    if has_any(WOMEN_WORDS) {
        Gender::Women
    } else if has_any(MEN_WORDS) {
        Gender::Men
    } else {
        Gender::Women
    }
}

/// Normalizes a free-text billing frequency. Anything not annual is monthly.
pub fn normalize_billing_type(label: &str) -> BillingType {
    let label = label.trim().to_lowercase();
    if label.contains("annual") || label.contains("year") {
        BillingType::Annual
    } else {
        BillingType::Monthly
    }
}
