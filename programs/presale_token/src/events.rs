use anchor_lang::prelude::*;

#[event]
pub struct TokenInitialized {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub decimals: u8,
}

#[event]
pub struct MinterAdded {
    pub mint: Pubkey,
    pub minter: Pubkey,
}

#[event]
pub struct TokensMinted {
    pub mint: Pubkey,
    pub minter: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}
