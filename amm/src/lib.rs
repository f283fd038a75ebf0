//! AMM protocol collaborator.
//!
//! Everything protocol-specific lives here: where a pool and its satellite
//! accounts live (program-derived addresses) and which instructions create
//! a pool or lock its LP tokens. The launcher only sees [`AmmProtocol`].

pub mod constants;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod pool;
pub mod protocol;

pub use constants::ProgramIds;
pub use error::AmmError;
pub use pool::{PoolCreationParams, PoolHandle};
pub use protocol::{AmmProtocol, DynamicAmm};
