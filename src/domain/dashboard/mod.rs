//! Dashboard domain - client-side UI state.

pub mod state;

pub use state::{
    AnalysisView, DashboardEvent, DashboardState, DashboardStatus, DashboardView, DisplayOutcome,
    ResultSource, Transition,
};
