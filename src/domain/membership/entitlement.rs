//! Credit grants generated for a membership cycle.
//!
//! A grant records how many credits of one type a member holds for one cycle.
//! Grants are only produced for credit types with a non-zero allocation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{calculate_cycle, resolve_tier, CreditAllocation, CreditType, CycleDates, MembershipError, Tier};
use crate::domain::foundation::{MemberId, UserId};

/// Credits of one type for one member and one cycle.
///
/// # Invariants
///
/// - `credits_remaining <= credits_total`
/// - `credits_total > 0`
/// - `cycle_start <= cycle_end`, `expires_at` is the end of `cycle_end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditGrant {
    pub member_id: MemberId,
    pub user_id: UserId,
    pub credit_type: CreditType,
    pub credits_total: u32,
    pub credits_remaining: u32,
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub expires_at: NaiveDateTime,
}

impl CreditGrant {
    /// The cycle window this grant belongs to.
    pub fn cycle(&self) -> CycleDates {
        CycleDates {
            cycle_start: self.cycle_start,
            cycle_end: self.cycle_end,
            expires_at: self.expires_at,
        }
    }

    /// True once `now` is past the grant's expiry instant.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        now > self.expires_at
    }

    /// True if credits can be redeemed at `now`.
    pub fn is_usable_at(&self, now: NaiveDateTime) -> bool {
        self.credits_remaining > 0 && now.date() >= self.cycle_start && !self.is_expired_at(now)
    }

    /// Redeem `credits` from this grant, returning what remains.
    ///
    /// # Errors
    ///
    /// - `Validation` if `credits` is zero
    /// - `GrantExpired` if the cycle has ended
    /// - `InsufficientCredits` if fewer than `credits` remain
    pub fn redeem(&mut self, credits: u32, now: NaiveDateTime) -> Result<u32, MembershipError> {
        if credits == 0 {
            return Err(MembershipError::validation("credits", "must redeem at least one credit"));
        }
        if self.is_expired_at(now) {
            return Err(MembershipError::GrantExpired {
                credit_type: self.credit_type,
                expired_at: self.expires_at,
            });
        }
        if credits > self.credits_remaining {
            return Err(MembershipError::InsufficientCredits {
                credit_type: self.credit_type,
                requested: credits,
                remaining: self.credits_remaining,
            });
        }
        self.credits_remaining -= credits;
        Ok(self.credits_remaining)
    }

    /// Return credits to the grant (e.g. a cancelled booking), never above the total.
    pub fn refund(&mut self, credits: u32) -> u32 {
        self.credits_remaining = self
            .credits_remaining
            .saturating_add(credits)
            .min(self.credits_total);
        self.credits_remaining
    }
}

/// Builds the grants a tier earns for a known cycle.
///
/// One grant per credit type with a non-zero allocation, in the order
/// class, red light, dry cryo.
pub fn grants_for_cycle(
    tier: Tier,
    cycle: &CycleDates,
    member_id: &MemberId,
    user_id: &UserId,
) -> Vec<CreditGrant> {
    CreditAllocation::for_tier(tier)
        .granted()
        .map(|(credit_type, credits)| CreditGrant {
            member_id: member_id.clone(),
            user_id: user_id.clone(),
            credit_type,
            credits_total: credits,
            credits_remaining: credits,
            cycle_start: cycle.cycle_start,
            cycle_end: cycle.cycle_end,
            expires_at: cycle.expires_at,
        })
        .collect()
}

/// Generates the credit grants for a membership cycle starting on `start_date`.
///
/// Resolves the tier from its free-text label and computes the cycle window.
/// Has no side effects; persisting the grants is the caller's job.
pub fn generate_credit_grants(
    tier_label: &str,
    start_date: NaiveDate,
    member_id: &MemberId,
    user_id: &UserId,
) -> Vec<CreditGrant> {
    let tier = resolve_tier(tier_label);
    let cycle = calculate_cycle(start_date);
    grants_for_cycle(tier, &cycle, member_id, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member() -> MemberId {
        MemberId::new("member-1").unwrap()
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn gold_grants() -> Vec<CreditGrant> {
        generate_credit_grants("gold", date(2024, 3, 15), &member(), &user())
    }

    #[test]
    fn gold_yields_red_light_and_dry_cryo_only() {
        let grants = gold_grants();
        assert_eq!(grants.len(), 2);

        assert_eq!(grants[0].credit_type, CreditType::RedLight);
        assert_eq!(grants[0].credits_total, 4);
        assert_eq!(grants[0].credits_remaining, 4);

        assert_eq!(grants[1].credit_type, CreditType::DryCryo);
        assert_eq!(grants[1].credits_total, 2);
        assert_eq!(grants[1].credits_remaining, 2);

        assert!(grants.iter().all(|g| g.credit_type != CreditType::Class));
        for grant in &grants {
            assert_eq!(grant.cycle_start, date(2024, 3, 15));
            assert_eq!(grant.cycle_end, date(2024, 4, 14));
            assert_eq!(grant.member_id, member());
            assert_eq!(grant.user_id, user());
        }
    }

    #[test]
    fn silver_yields_no_grants() {
        for start in [date(2024, 1, 1), date(2024, 1, 31), date(2025, 7, 19)] {
            assert!(generate_credit_grants("Silver Membership", start, &member(), &user()).is_empty());
        }
    }

    #[test]
    fn unknown_label_is_treated_as_silver() {
        assert!(generate_credit_grants("bronze", date(2024, 1, 1), &member(), &user()).is_empty());
    }

    #[test]
    fn diamond_yields_three_grants_in_order() {
        let grants = generate_credit_grants("Diamond Membership", date(2024, 1, 31), &member(), &user());
        let summary: Vec<_> = grants
            .iter()
            .map(|g| (g.credit_type, g.credits_total, g.credits_remaining))
            .collect();
        assert_eq!(
            summary,
            vec![
                (CreditType::Class, 10, 10),
                (CreditType::RedLight, 10, 10),
                (CreditType::DryCryo, 6, 6)
            ]
        );
        assert!(grants.iter().all(|g| g.cycle_end == date(2024, 2, 29)));
    }

    #[test]
    fn grants_serialize_with_snake_case_fields() {
        let json = serde_json::to_value(&gold_grants()[0]).unwrap();
        assert_eq!(json["credit_type"], "red_light");
        assert_eq!(json["credits_total"], 4);
        assert_eq!(json["cycle_start"], "2024-03-15");
        assert_eq!(json["cycle_end"], "2024-04-14");
    }

    #[test]
    fn redeem_decrements_remaining() {
        let mut grant = gold_grants().remove(0);
        let now = date(2024, 3, 20).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(grant.redeem(1, now).unwrap(), 3);
        assert_eq!(grant.redeem(3, now).unwrap(), 0);
        assert_eq!(grant.credits_total, 4);
        assert!(!grant.is_usable_at(now));
    }

    #[test]
    fn redeem_rejects_more_than_remaining() {
        let mut grant = gold_grants().remove(1);
        let now = date(2024, 3, 20).and_hms_opt(9, 0, 0).unwrap();
        let err = grant.redeem(3, now).unwrap_err();
        assert!(matches!(
            err,
            MembershipError::InsufficientCredits { requested: 3, remaining: 2, .. }
        ));
        assert_eq!(grant.credits_remaining, 2);
    }

    #[test]
    fn redeem_rejects_after_expiry() {
        let mut grant = gold_grants().remove(0);
        let last_moment = date(2024, 4, 14).and_hms_milli_opt(23, 59, 59, 999).unwrap();
        assert!(grant.is_usable_at(last_moment));
        let after = date(2024, 4, 15).and_hms_opt(0, 0, 0).unwrap();
        assert!(matches!(
            grant.redeem(1, after),
            Err(MembershipError::GrantExpired { .. })
        ));
    }

    #[test]
    fn redeem_rejects_zero() {
        let mut grant = gold_grants().remove(0);
        let now = date(2024, 3, 20).and_hms_opt(9, 0, 0).unwrap();
        assert!(matches!(grant.redeem(0, now), Err(MembershipError::Validation { .. })));
    }

    #[test]
    fn grant_not_usable_before_cycle_start() {
        let grant = gold_grants().remove(0);
        let before = date(2024, 3, 14).and_hms_opt(12, 0, 0).unwrap();
        assert!(!grant.is_usable_at(before));
    }

    #[test]
    fn refund_caps_at_total() {
        let mut grant = gold_grants().remove(0);
        let now = date(2024, 3, 20).and_hms_opt(9, 0, 0).unwrap();
        grant.redeem(2, now).unwrap();
        assert_eq!(grant.refund(1), 3);
        assert_eq!(grant.refund(10), 4);
    }

    #[test]
    fn cycle_reconstructs_window() {
        let grant = gold_grants().remove(0);
        assert_eq!(grant.cycle(), calculate_cycle(date(2024, 3, 15)));
    }
}
