//! Nullable infrastructure for deterministic testing.
//!
//! The cluster is abstracted behind [`lplock_rpc::Network`]. This crate
//! provides a test-friendly implementation that:
//! - Returns deterministic values
//! - Can be scripted to fail at a chosen transaction
//! - Records every call for assertions
//! - Never touches the network
//!
//! Usage: swap `RpcClient` for [`NullNetwork`] in tests.

pub mod network;

pub use network::{NetworkCall, NullNetwork};
