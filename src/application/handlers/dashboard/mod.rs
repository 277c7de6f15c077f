//! Dashboard-side handlers.

mod analyze;

pub use analyze::{DashboardSession, EMPTY_INPUT_MESSAGE};
