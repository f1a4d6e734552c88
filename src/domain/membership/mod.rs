//! Membership domain module.
//!
//! Handles tier resolution, credit cycles, entitlement generation, the price
//! catalog and the membership status lifecycle.
//!
//! # Module Structure
//!
//! - `tier` - Tier and the permissive label resolver
//! - `credit_allocation` - Credit types and per-tier allocation table
//! - `cycle` - Monthly credit-cycle calculator
//! - `entitlement` - Credit grants generated for a cycle
//! - `pricing` - Static price catalog and input normalizers
//! - `status` - MembershipStatus state machine
//! - `aggregate` - Membership aggregate entity
//! - `errors` - Membership-specific errors

mod aggregate;
mod credit_allocation;
mod cycle;
mod entitlement;
mod errors;
mod pricing;
mod status;
mod tier;

pub use aggregate::Membership;
pub use credit_allocation::{CreditAllocation, CreditType};
pub use cycle::{calculate_cycle, CycleDates};
pub use entitlement::{generate_credit_grants, grants_for_cycle, CreditGrant};
pub use errors::MembershipError;
pub use pricing::{
    annual_fee_price, annual_fee_price_id, class_pass_price, class_pass_price_id,
    membership_price, membership_price_id, membership_price_id_for, normalize_billing_type, normalize_gender,
    normalize_tier_name, BillingType, Gender, PriceEntry,
};
pub use status::MembershipStatus;
pub use tier::{resolve_tier, Tier};
