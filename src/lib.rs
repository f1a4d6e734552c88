//! Club Credits - Membership entitlements for a wellness club
//!
//! This crate implements the tiered credit allocation and billing-cycle
//! calculator, the price catalog, and the lifecycle jobs (activation
//! reminders, freeze expiration, waitlist offers) that run around them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
