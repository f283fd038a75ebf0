//! Pre-built [`tracing::Span`] constructors for launch phases.
//!
//! Consistent span names and fields make a run easy to follow in either
//! log format: every line emitted while a transaction is in flight carries
//! its step.

use lplock_types::Pubkey;
use tracing::{info_span, Span};

use crate::runner::Step;

/// Span covering a whole launch.
pub fn launch_span(pool: &Pubkey) -> Span {
    info_span!("launch", pool = %pool)
}

/// Span covering one phase (pool creation, locking).
pub fn phase_span(phase: &str, transactions: usize) -> Span {
    info_span!("phase", name = %phase, transactions)
}

/// Span covering sign, submit and finality of one transaction.
pub fn transaction_span(step: &Step) -> Span {
    info_span!("transaction", step = %step)
}
