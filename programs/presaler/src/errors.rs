use anchor_lang::prelude::*;

#[error_code]
pub enum PresaleError {
    #[msg("Parameter arrays must be the same length")]
    LengthMismatch,
    #[msg("End date must be after the start date")]
    InvalidWindow,
    #[msg("No presale exists with this id")]
    UnknownPresale,
    #[msg("Presale is not active")]
    NotActive,
    #[msg("Presale has ended")]
    Ended,
    #[msg("Not enough tokens in custody for this purchase")]
    InsufficientInventory,
    #[msg("Caller is not allowed to do this")]
    Unauthorized,
    #[msg("Presale window has not closed yet")]
    NotEnded,
    #[msg("Unsold tokens have already been withdrawn")]
    AlreadyWithdrawn,
    #[msg("Presale has already been finalized")]
    AlreadyEnded,
    #[msg("Usage fee cannot exceed 10000 basis points")]
    InvalidFee,
    #[msg("Token price must be greater than zero")]
    ZeroPrice,
    #[msg("Too many presales in one batch")]
    BatchTooLarge,
    #[msg("Presale or custody account does not match its id")]
    PresaleAccountMismatch,
    #[msg("Invalid mint for this presale")]
    MintMismatch,
    #[msg("Liquidity program does not match the registry")]
    InvalidLiquidityProgram,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
