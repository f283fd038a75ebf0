//! Signature status evaluation.

use lplock_types::Commitment;

/// What the node knows about a submitted signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Execution error, rendered for reporting.
    pub err: Option<String>,
    /// Strongest commitment level the transaction has reached.
    pub confirmation_status: Option<Commitment>,
}

impl SignatureStatus {
    pub fn landed(level: Commitment) -> Self {
        Self {
            err: None,
            confirmation_status: Some(level),
        }
    }

    pub fn failed(reason: impl Into<String>, level: Commitment) -> Self {
        Self {
            err: Some(reason.into()),
            confirmation_status: Some(level),
        }
    }
}

/// Outcome of looking at a status once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCheck {
    /// Unknown to the node, or not yet at the required level.
    Pending,
    /// Landed at or above the required level.
    Reached(Commitment),
    /// Landed, but the program returned an error.
    Failed(String),
}

/// Compare a status against the required commitment.
///
/// An execution error wins over any commitment level: a failed transaction
/// never becomes successful by finalizing.
pub fn check_status(status: Option<&SignatureStatus>, required: Commitment) -> StatusCheck {
    let Some(status) = status else {
        return StatusCheck::Pending;
    };
    if let Some(err) = &status.err {
        return StatusCheck::Failed(err.clone());
    }
    match status.confirmation_status {
        Some(level) if level >= required => StatusCheck::Reached(level),
        _ => StatusCheck::Pending,
    }
}
