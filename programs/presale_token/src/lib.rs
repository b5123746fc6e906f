use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface};

pub mod errors;
pub mod events;
pub mod state;

use errors::TokenError;
use events::*;
use state::*;

declare_id!("4PH6oo2FXgLe5GwVzWWRpheGZ8Ph7C68ixA38j42C5a1");

#[program]
pub mod presale_token {
    use super::*;

    // ═════════════════════════════════════════════════════════════════════
    // 1. INITIALIZE
    // ═════════════════════════════════════════════════════════════════════
    /// Creates a mint whose authority is a minter registry. The owner is
    /// registered as the first minter.
    pub fn initialize(ctx: Context<InitializeToken>, decimals: u8) -> Result<()> {
        let registry = &mut ctx.accounts.minter_registry;
        registry.owner = ctx.accounts.owner.key();
        registry.mint = ctx.accounts.mint.key();
        registry.minters = vec![registry.owner];
        registry.bump = ctx.bumps.minter_registry;

        msg!(
            "PRESALE_TOKEN: Mint {} created with {} decimals, owner {}",
            registry.mint,
            decimals,
            registry.owner
        );
        emit!(TokenInitialized {
            mint: registry.mint,
            owner: registry.owner,
            decimals,
        });

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 2. ADD MINTER
    // ═════════════════════════════════════════════════════════════════════
    pub fn add_minter(ctx: Context<AddMinter>, minter: Pubkey) -> Result<()> {
        let registry = &mut ctx.accounts.minter_registry;
        registry.add_minter(&ctx.accounts.owner.key(), minter)?;

        msg!("PRESALE_TOKEN: Minter {} added for mint {}", minter, registry.mint);
        emit!(MinterAdded {
            mint: registry.mint,
            minter,
        });

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 3. MINT
    // ═════════════════════════════════════════════════════════════════════
    /// Mints `amount` to the recipient's associated token account, creating it
    /// if needed. Only registered minters may call this.
    pub fn mint(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        let registry = &ctx.accounts.minter_registry;
        require!(
            registry.is_minter(&ctx.accounts.minter.key()),
            TokenError::NotMinter
        );

        let mint_key = registry.mint;
        let registry_seeds: &[&[u8]] = &[
            MinterRegistry::SEED,
            mint_key.as_ref(),
            &[registry.bump],
        ];

        token_interface::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.recipient_token_account.to_account_info(),
                    authority: ctx.accounts.minter_registry.to_account_info(),
                },
                &[registry_seeds],
            ),
            amount,
        )?;

        msg!(
            "PRESALE_TOKEN: {} minted {} to {}",
            ctx.accounts.minter.key(),
            amount,
            ctx.accounts.recipient.key()
        );
        emit!(TokensMinted {
            mint: mint_key,
            minter: ctx.accounts.minter.key(),
            recipient: ctx.accounts.recipient.key(),
            amount,
        });

        Ok(())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// ACCOUNT CONTEXTS
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(decimals: u8)]
pub struct InitializeToken<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Registry PDA, also the mint authority.
    #[account(
        init,
        payer = owner,
        space = MinterRegistry::MAX_SIZE,
        seeds = [MinterRegistry::SEED, mint.key().as_ref()],
        bump,
    )]
    pub minter_registry: Account<'info, MinterRegistry>,

    #[account(
        init,
        payer = owner,
        mint::decimals = decimals,
        mint::authority = minter_registry,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AddMinter<'info> {
    /// Must be the registry owner; checked in `MinterRegistry::add_minter`.
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MinterRegistry::SEED, minter_registry.mint.as_ref()],
        bump = minter_registry.bump,
    )]
    pub minter_registry: Account<'info, MinterRegistry>,
}

#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(mut)]
    pub minter: Signer<'info>,

    #[account(
        seeds = [MinterRegistry::SEED, mint.key().as_ref()],
        bump = minter_registry.bump,
    )]
    pub minter_registry: Account<'info, MinterRegistry>,

    #[account(
        mut,
        constraint = mint.key() == minter_registry.mint @ TokenError::InvalidMint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: any wallet; only used to derive its associated token account.
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = minter,
        associated_token::mint = mint,
        associated_token::authority = recipient,
        associated_token::token_program = token_program,
    )]
    pub recipient_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
