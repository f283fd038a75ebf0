//! Address derivations for pools, vaults, escrows and token accounts.

use lplock_types::Pubkey;

use crate::constants::{seeds, ProgramIds};

/// The larger of two keys, by byte order. Pool seeds put it first.
pub fn first_key(a: &Pubkey, b: &Pubkey) -> Pubkey {
    *a.max(b)
}

/// The smaller of two keys, by byte order.
pub fn second_key(a: &Pubkey, b: &Pubkey) -> Pubkey {
    *a.min(b)
}

fn derive(seeds: &[&[u8]], program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(seeds, program).0
}

/// Pool address for a token pair under a fee configuration.
///
/// Symmetric in the two mints, so one pair and config map to exactly one pool.
pub fn pool_address_with_config(mint_a: &Pubkey, mint_b: &Pubkey, config: &Pubkey, ids: &ProgramIds) -> Pubkey {
    let first = first_key(mint_a, mint_b);
    let second = second_key(mint_a, mint_b);
    derive(&[first.as_ref(), second.as_ref(), config.as_ref()], &ids.amm)
}

/// Pool-share mint of a pool.
pub fn lp_mint(pool: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::LP_MINT, pool.as_ref()], &ids.amm)
}

/// Per-owner lock escrow of a pool.
pub fn lock_escrow(pool: &Pubkey, owner: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::LOCK_ESCROW, pool.as_ref(), owner.as_ref()], &ids.amm)
}

/// Protocol fee token account of a pool for one of its mints.
pub fn protocol_fee(mint: &Pubkey, pool: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::FEE, mint.as_ref(), pool.as_ref()], &ids.amm)
}

/// The pool's LP position in a vault.
pub fn vault_lp(vault: &Pubkey, pool: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[vault.as_ref(), pool.as_ref()], &ids.amm)
}

/// Lending vault for a mint.
pub fn vault(mint: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::VAULT, mint.as_ref(), ids.vault_base.as_ref()], &ids.vault)
}

/// Token reserve account of a vault.
pub fn token_vault(vault: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::TOKEN_VAULT, vault.as_ref()], &ids.vault)
}

/// LP mint of a vault.
pub fn vault_lp_mint(vault: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::LP_MINT, vault.as_ref()], &ids.vault)
}

/// Token metadata account of a mint.
pub fn mint_metadata(mint: &Pubkey, ids: &ProgramIds) -> Pubkey {
    derive(&[seeds::METADATA, ids.metadata.as_ref(), mint.as_ref()], &ids.metadata)
}

/// Associated token account of `owner` for `mint` under the configured token program.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, ids: &ProgramIds) -> Pubkey {
    spl_associated_token_account::get_associated_token_address_with_program_id(owner, mint, &ids.token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Pubkey {
        s.parse().unwrap()
    }

    fn mints() -> (Pubkey, Pubkey, Pubkey) {
        (
            key("CfmVE9LQqRAHmSGDVkUoRbtiHbPKERUDaZ7Skw8DT4zN"),
            key("BXTou3CvPxpFVAJvzvEZcAnRLGCHqT1LHKsFTSQft7s"),
            key("21PjsfQVgrn56jSypUT5qXwwSjwKWvuoBCKbVZrgTLz4"),
        )
    }

    #[test]
    fn key_ordering_helpers_partition_the_pair() {
        let (a, b, _) = mints();
        let first = first_key(&a, &b);
        let second = second_key(&a, &b);
        assert_ne!(first, second);
        assert!(first.to_bytes() > second.to_bytes());
        assert_eq!(first_key(&b, &a), first);
    }

    #[test]
    fn pool_address_is_symmetric_in_mints() {
        let ids = ProgramIds::default();
        let (a, b, config) = mints();
        let ab = pool_address_with_config(&a, &b, &config, &ids);
        let ba = pool_address_with_config(&b, &a, &config, &ids);
        assert_eq!(ab, ba);
        assert!(!ab.is_on_curve());
    }

    #[test]
    fn config_changes_pool_address() {
        let ids = ProgramIds::default();
        let (a, b, config) = mints();
        let other_config = Pubkey::new_from_array([1u8; 32]);
        assert_ne!(
            pool_address_with_config(&a, &b, &config, &ids),
            pool_address_with_config(&a, &b, &other_config, &ids)
        );
    }

    #[test]
    fn escrows_differ_per_owner() {
        let ids = ProgramIds::default();
        let pool = Pubkey::new_from_array([5u8; 32]);
        let one = lock_escrow(&pool, &key("4sBMz7zmDWPzdEnECJW3NA9mEcNwkjYtVnL2KySaWYAf"), &ids);
        let two = lock_escrow(&pool, &key("CVV5MxfwA24PsM7iuS2ddssYgySf5SxVJ8PpAwGN2yVy"), &ids);
        assert_ne!(one, two);
    }

    #[test]
    fn associated_token_accounts_follow_the_spl_derivation() {
        let ids = ProgramIds::default();
        let (mint, _, owner) = mints();
        let ata = associated_token_address(&owner, &mint, &ids);
        assert_eq!(ata, spl_associated_token_account::get_associated_token_address(&owner, &mint));
        assert!(!ata.is_on_curve());
        assert_ne!(ata, associated_token_address(&mint, &owner, &ids));
    }
}
