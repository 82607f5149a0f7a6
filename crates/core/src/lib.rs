//! Orchard Core - Shared types and validation rules.
//!
//! This crate provides the types and checks shared across Orchard Lane
//! components:
//! - `identity` - Registration, login, password reset, and access control
//! - future storefront/admin surfaces that must apply the same field rules
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Every write path in the system validates input
//! through [`validate`] (directly or via the newtypes in [`types`]), so the
//! field rules exist in exactly one place.
//!
//! # Modules
//!
//! - [`validate`] - Pure predicate functions over raw field values
//! - [`types`] - Validated newtypes for emails, phones, birth dates, ids, roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validate;

pub use types::*;
