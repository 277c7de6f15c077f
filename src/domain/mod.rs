//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machines)
//! - `analysis` - Request and result vocabulary, prompt, fallback scorer
//! - `dashboard` - Client-side dashboard state and reducer

pub mod analysis;
pub mod dashboard;
pub mod foundation;
