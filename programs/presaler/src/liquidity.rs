use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

// ─────────────────────────────────────────────────────────────────────────────
// Liquidity service: seeds an external AMM pool on finalization
// ─────────────────────────────────────────────────────────────────────────────
//
// The pool program is configured in PresaleRegistry and called with an
// Anchor-style instruction:
//
//   data     = sighash("global:add_liquidity") ++ borsh(AddLiquidityArgs)
//   accounts = [custody (w, signer), token_vault (w), token_mint,
//               token_program, system_program, ...pool accounts]
//
// Custody signs through its PDA seeds, so the pool program pulls both the
// lamports and the tokens itself. Pool accounts are forwarded verbatim from
// the caller's remaining accounts. Whatever pool-share accounting the program
// returns is ignored.

const ADD_LIQUIDITY_SIGHASH_PREIMAGE: &str = "global:add_liquidity";

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct AddLiquidityArgs {
    pub token_amount: u64,
    pub value_amount: u64,
    /// Receives the pool shares.
    pub recipient: Pubkey,
}

pub fn add_liquidity_discriminator() -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(ADD_LIQUIDITY_SIGHASH_PREIMAGE.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Accounts handed to the pool program, in wire order.
pub struct AddLiquidity<'a, 'info> {
    pub custody: &'a AccountInfo<'info>,
    pub token_vault: &'a AccountInfo<'info>,
    pub token_mint: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub pool_accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> AddLiquidity<'a, 'info> {
    fn account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.custody.key(), true),
            AccountMeta::new(self.token_vault.key(), false),
            AccountMeta::new_readonly(self.token_mint.key(), false),
            AccountMeta::new_readonly(self.token_program.key(), false),
            AccountMeta::new_readonly(self.system_program.key(), false),
        ];
        metas.extend(self.pool_accounts.iter().map(|info| AccountMeta {
            pubkey: info.key(),
            is_signer: info.is_signer,
            is_writable: info.is_writable,
        }));
        metas
    }

    fn account_infos(&self, program: &AccountInfo<'info>) -> Vec<AccountInfo<'info>> {
        let mut infos = vec![
            self.custody.clone(),
            self.token_vault.clone(),
            self.token_mint.clone(),
            self.token_program.clone(),
            self.system_program.clone(),
        ];
        infos.extend(self.pool_accounts.iter().cloned());
        infos.push(program.clone());
        infos
    }
}

pub fn add_liquidity_instruction(
    program_id: Pubkey,
    account_metas: Vec<AccountMeta>,
    args: &AddLiquidityArgs,
) -> Result<Instruction> {
    let mut data = add_liquidity_discriminator().to_vec();
    args.serialize(&mut data)
        .map_err(|_| error!(anchor_lang::error::ErrorCode::InstructionDidNotSerialize))?;
    Ok(Instruction {
        program_id,
        accounts: account_metas,
        data,
    })
}

/// Deposits `args.value_amount` lamports and `args.token_amount` tokens from
/// custody into the pool program.
pub fn add_liquidity<'info>(
    program: &AccountInfo<'info>,
    accounts: AddLiquidity<'_, 'info>,
    args: AddLiquidityArgs,
    custody_seeds: &[&[&[u8]]],
) -> Result<()> {
    let ix = add_liquidity_instruction(program.key(), accounts.account_metas(), &args)?;
    invoke_signed(&ix, &accounts.account_infos(program), custody_seeds)?;
    Ok(())
}
