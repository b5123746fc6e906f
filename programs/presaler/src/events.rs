use anchor_lang::prelude::*;

#[event]
pub struct PresalerInitialized {
    pub admin: Pubkey,
    pub usage_fee_bps: u16,
    pub liquidity_program: Pubkey,
}

#[event]
pub struct PresaleOpened {
    pub presale_id: u64,
    pub creator: Pubkey,
    pub token_mint: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub token_price: u64,
    pub token_supply: u64,
}

#[event]
pub struct TokensPurchased {
    pub presale_id: u64,
    pub buyer: Pubkey,
    pub contributed_value: u64,
    pub tokens: u64,
}

#[event]
pub struct UnsoldWithdrawn {
    pub presale_id: u64,
    pub creator: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PresaleFinalized {
    pub presale_id: u64,
    pub caller: Pubkey,
    pub fee: u64,
    pub liquidity_value: u64,
    pub liquidity_tokens: u64,
}

#[event]
pub struct UsageFeeChanged {
    pub admin: Pubkey,
    pub usage_fee_bps: u16,
}
