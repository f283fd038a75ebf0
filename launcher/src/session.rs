//! Everything a launch needs, owned in one place.

use lplock_amm::AmmProtocol;
use lplock_rpc::Network;
use lplock_types::{Keypair, Pubkey, Signer};

use crate::runner::TransactionRunner;

/// The network, the AMM program and the operator key of one run.
///
/// Built once at startup and passed down explicitly.
pub struct Session<N, A> {
    network: N,
    amm: A,
    payer: Keypair,
}

impl<N: Network, A: AmmProtocol> Session<N, A> {
    pub fn new(network: N, amm: A, payer: Keypair) -> Self {
        Self { network, amm, payer }
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn amm(&self) -> &A {
        &self.amm
    }

    /// The operator: fee payer, pool creator and LP token holder.
    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// A runner signing with the operator key.
    pub fn runner(&self) -> TransactionRunner<'_, N> {
        TransactionRunner::new(&self.network, &self.payer)
    }
}
