//! # starhook-domain
//!
//! Pure domain model for the starhook sequencer plugins.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, wall-clock helpers
//! - Define **Device descriptors** (identity of equipment offered by a provider)
//! - Define **Trigger metadata** and the sequence steps a trigger is polled between
//! - Define the persisted **timed trigger settings** and the pure planning
//!   functions that compute the next fire time
//! - Define the **interval trigger** draw rule
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod trigger;
