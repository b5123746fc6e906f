use anchor_lang::prelude::*;

use crate::errors::TokenError;

// ─────────────────────────────────────────────────────────────────────────────
// MinterRegistry: keys allowed to mint, and the mint authority itself
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"minter_registry", mint.key().as_ref()]

#[account]
#[derive(Debug)]
pub struct MinterRegistry {
    /// Wallet that created the token. Only it can add minters.
    pub owner: Pubkey,

    /// The mint this registry controls.
    pub mint: Pubkey,

    /// Keys allowed to mint. The owner is always the first entry.
    pub minters: Vec<Pubkey>,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl MinterRegistry {
    pub const SEED: &'static [u8] = b"minter_registry";

    pub const MAX_MINTERS: usize = 16;
    pub const MAX_SIZE: usize = 8  // discriminator
        + 32  // owner
        + 32  // mint
        + 4 + (32 * Self::MAX_MINTERS)  // Vec<Pubkey>
        + 1;  // bump

    pub fn is_minter(&self, key: &Pubkey) -> bool {
        self.minters.contains(key)
    }

    pub fn add_minter(&mut self, caller: &Pubkey, minter: Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, TokenError::NotOwner);
        require!(!self.is_minter(&minter), TokenError::MinterAlreadyRegistered);
        require!(
            self.minters.len() < Self::MAX_MINTERS,
            TokenError::TooManyMinters
        );
        self.minters.push(minter);
        Ok(())
    }
}
