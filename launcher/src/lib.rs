//! Pool launch orchestration.
//!
//! A launch runs once: create the pool, read the operator's LP balance,
//! split it across beneficiaries, lock each share. Every transaction goes
//! through the [`TransactionRunner`], which signs it, submits it and waits
//! for finality before the next one is touched. The first failure ends the
//! run.
//!
//! Re-running a launch is not idempotent: a pool that already exists makes
//! pool creation fail, and completed locks are not remembered.

pub mod config;
pub mod error;
pub mod launch;
pub mod runner;
pub mod session;
pub mod tracing_spans;

pub use config::LaunchConfig;
pub use error::{ConfigError, RunError};
pub use launch::{
    create_pool_and_lock_liquidity, plan_launch, LaunchPlan, LaunchReport, LockReceipt, PlannedLaunch,
    PlannedLock,
};
pub use runner::{Phase, Step, TransactionRunner, REQUIRED_COMMITMENT};
pub use session::Session;
