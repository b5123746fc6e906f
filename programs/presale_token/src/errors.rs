use anchor_lang::prelude::*;

#[error_code]
pub enum TokenError {
    #[msg("Caller must be a minter")]
    NotMinter,
    #[msg("Only the token owner can call this")]
    NotOwner,
    #[msg("Minter is already registered")]
    MinterAlreadyRegistered,
    #[msg("Minter registry is full")]
    TooManyMinters,
    #[msg("Invalid mint for this registry")]
    InvalidMint,
}
