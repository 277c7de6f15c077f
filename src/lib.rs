//! Brand Voice - text analysis gateway and dashboard controller.
//!
//! The gateway forwards text to a hosted language model and returns its
//! brand-voice metrics. The dashboard controller calls the gateway and scores
//! text locally whenever the remote answer is unusable.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
