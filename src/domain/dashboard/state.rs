//! Dashboard UI state and its reducer.
//!
//! The whole client-side state lives in one serializable [`DashboardState`]
//! value that only changes through [`DashboardState::apply`].

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisResult, ProviderKind};
use crate::domain::foundation::{StateMachine, Ticket, Timestamp, ValidationError};

/// Coarse lifecycle status of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    Idle,
    Analyzing,
    Displayed,
}

impl StateMachine for DashboardStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DashboardStatus::*;
        matches!(
            (self, target),
            (Idle, Analyzing)
                | (Idle, Displayed)
                | (Analyzing, Analyzing)
                | (Analyzing, Displayed)
                | (Displayed, Analyzing)
                | (Displayed, Displayed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DashboardStatus::*;
        match self {
            Idle => vec![Analyzing, Displayed],
            Analyzing => vec![Analyzing, Displayed],
            Displayed => vec![Analyzing, Displayed],
        }
    }
}

/// Where a displayed result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Parsed from the gateway's provider reply.
    Remote,
    /// Produced by the local fallback scorer.
    Fallback,
}

/// A completed analysis as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisView {
    pub result: AnalysisResult,
    pub source: ResultSource,
    pub provider: ProviderKind,
    pub completed_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayOutcome {
    Result { analysis: AnalysisView },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Idle,
    Analyzing {
        ticket: Ticket,
        provider: ProviderKind,
        started_at: Timestamp,
    },
    Displayed { outcome: DisplayOutcome },
}

impl DashboardView {
    pub fn status(&self) -> DashboardStatus {
        match self {
            DashboardView::Idle => DashboardStatus::Idle,
            DashboardView::Analyzing { .. } => DashboardStatus::Analyzing,
            DashboardView::Displayed { .. } => DashboardStatus::Displayed,
        }
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The user picked a provider for subsequent submits.
    ProviderSelected { provider: ProviderKind },
    /// A non-empty text was submitted under `ticket`.
    Submitted { ticket: Ticket, at: Timestamp },
    /// The analysis for `ticket` finished, remotely or via fallback.
    Completed { ticket: Ticket, analysis: AnalysisView },
    /// Local validation refused the input; no request was made.
    Rejected { message: String },
}

/// What the reducer did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// A newer submit replaced the one still in flight.
    Superseded { previous: Ticket },
    /// A completion for a ticket that is no longer in flight was dropped.
    IgnoredStale { ticket: Ticket },
    /// A validation rejection arrived while `in_flight` was outstanding.
    IgnoredWhileBusy { in_flight: Ticket },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    provider: ProviderKind,
    last_ticket: Ticket,
    view: DashboardView,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(ProviderKind::default())
    }
}

impl DashboardState {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            last_ticket: Ticket::ZERO,
            view: DashboardView::Idle,
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn status(&self) -> DashboardStatus {
        self.view.status()
    }

    /// Ticket to use for the next submit.
    pub fn next_ticket(&self) -> Ticket {
        self.last_ticket.next()
    }

    /// Ticket of the request currently outstanding, if any.
    pub fn in_flight(&self) -> Option<Ticket> {
        match self.view {
            DashboardView::Analyzing { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// True while a request is outstanding; the submit action should be disabled.
    pub fn is_busy(&self) -> bool {
        self.in_flight().is_some()
    }

    /// The analysis currently on screen, if any.
    pub fn displayed_analysis(&self) -> Option<&AnalysisView> {
        match &self.view {
            DashboardView::Displayed {
                outcome: DisplayOutcome::Result { analysis },
            } => Some(analysis),
            _ => None,
        }
    }

    /// The validation message currently on screen, if any.
    pub fn displayed_error(&self) -> Option<&str> {
        match &self.view {
            DashboardView::Displayed {
                outcome: DisplayOutcome::Error { message },
            } => Some(message),
            _ => None,
        }
    }

    /// Single entry point for every state change.
    pub fn apply(&mut self, event: DashboardEvent) -> Result<Transition, ValidationError> {
        match event {
            DashboardEvent::ProviderSelected { provider } => {
                self.provider = provider;
                Ok(Transition::Applied)
            }
            DashboardEvent::Submitted { ticket, at } => {
                if ticket <= self.last_ticket {
                    return Err(ValidationError::invalid_format(
                        "ticket",
                        format!("{} was already issued (last {})", ticket, self.last_ticket),
                    ));
                }
                self.status().transition_to(DashboardStatus::Analyzing)?;

                let previous = self.in_flight();
                self.last_ticket = ticket;
                self.view = DashboardView::Analyzing {
                    ticket,
                    provider: self.provider,
                    started_at: at,
                };
                Ok(previous
                    .map(|previous| Transition::Superseded { previous })
                    .unwrap_or(Transition::Applied))
            }
            DashboardEvent::Completed { ticket, analysis } => {
                if self.in_flight() == Some(ticket) {
                    self.status().transition_to(DashboardStatus::Displayed)?;
                    self.view = DashboardView::Displayed {
                        outcome: DisplayOutcome::Result { analysis },
                    };
                    Ok(Transition::Applied)
                } else if ticket <= self.last_ticket {
                    Ok(Transition::IgnoredStale { ticket })
                } else {
                    Err(ValidationError::invalid_format(
                        "ticket",
                        format!("{} was never submitted", ticket),
                    ))
                }
            }
            DashboardEvent::Rejected { message } => {
                if let Some(in_flight) = self.in_flight() {
                    return Ok(Transition::IgnoredWhileBusy { in_flight });
                }
                self.status().transition_to(DashboardStatus::Displayed)?;
                self.view = DashboardView::Displayed {
                    outcome: DisplayOutcome::Error { message },
                };
                Ok(Transition::Applied)
            }
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
