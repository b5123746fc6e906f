use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

pub mod errors;
pub mod events;
pub mod liquidity;
pub mod state;

use errors::PresaleError;
use events::*;
use liquidity::{AddLiquidity, AddLiquidityArgs};
use state::*;

declare_id!("6YfVDsEZHMjyEqDKiAGoYC3ZBGMxFTN4j3Kz66Wf1gST");

#[program]
pub mod presaler {
    use super::*;

    // ═════════════════════════════════════════════════════════════════════
    // 1. INITIALIZE
    // ═════════════════════════════════════════════════════════════════════
    /// Creates the fee policy and the presale registry. Runs once per
    /// deployment; both accounts are singleton PDAs.
    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        usage_fee_bps: u16,
        liquidity_program: Pubkey,
    ) -> Result<()> {
        FeePolicy::validate_fee(usage_fee_bps)?;

        let fee_policy = &mut ctx.accounts.fee_policy;
        fee_policy.admin = admin;
        fee_policy.usage_fee_bps = usage_fee_bps;
        fee_policy.bump = ctx.bumps.fee_policy;

        let registry = &mut ctx.accounts.presale_registry;
        registry.presale_count = 0;
        registry.liquidity_program = liquidity_program;
        registry.bump = ctx.bumps.presale_registry;

        msg!(
            "PRESALER: Initialized. admin={}, usage_fee_bps={}, liquidity_program={}",
            admin,
            usage_fee_bps,
            liquidity_program
        );
        emit!(PresalerInitialized {
            admin,
            usage_fee_bps,
            liquidity_program,
        });

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 2. OPEN PRESALES
    // ═════════════════════════════════════════════════════════════════════
    /// Opens one presale per position of the parallel arrays.
    ///
    /// Remaining accounts carry `[presale_i, custody_i]` for each new id, in
    /// id order. Both are created here: the presale as a program-owned data
    /// account, custody funded with the zero-data rent minimum. Inventory is
    /// deposited separately by transferring tokens into the custody's
    /// associated token account.
    pub fn open_presales<'info>(
        ctx: Context<'_, '_, 'info, 'info, OpenPresales<'info>>,
        start_times: Vec<i64>,
        end_times: Vec<i64>,
        token_prices: Vec<u64>,
        token_mints: Vec<Pubkey>,
        token_supplies: Vec<u64>,
    ) -> Result<()> {
        let batch = PresaleTerms::collect(
            &start_times,
            &end_times,
            &token_prices,
            &token_mints,
            &token_supplies,
        )?;
        require!(
            ctx.remaining_accounts.len() == batch.len() * 2,
            PresaleError::PresaleAccountMismatch
        );

        let creator_key = ctx.accounts.creator.key();
        let creator_info = ctx.accounts.creator.to_account_info();
        let system_info = ctx.accounts.system_program.to_account_info();
        let ids = ctx.accounts.presale_registry.issue_ids(batch.len())?;
        let rent = Rent::get()?;
        let custody_reserve = rent.minimum_balance(0);

        for ((id, terms), accounts) in ids
            .clone()
            .zip(batch.iter())
            .zip(ctx.remaining_accounts.chunks_exact(2))
        {
            let (presale_info, custody_info) = (&accounts[0], &accounts[1]);
            let id_bytes = id.to_le_bytes();

            let (presale_key, bump) =
                Pubkey::find_program_address(&[Presale::SEED, &id_bytes], ctx.program_id);
            let (custody_key, custody_bump) =
                Pubkey::find_program_address(&[Presale::CUSTODY_SEED, &id_bytes], ctx.program_id);
            require_keys_eq!(
                presale_info.key(),
                presale_key,
                PresaleError::PresaleAccountMismatch
            );
            require_keys_eq!(
                custody_info.key(),
                custody_key,
                PresaleError::PresaleAccountMismatch
            );

            // ── Create the Presale account ──────────────────────────────
            let presale_seeds: &[&[u8]] = &[Presale::SEED, &id_bytes, &[bump]];
            create_pda_account(
                &creator_info,
                presale_info,
                &system_info,
                Presale::MAX_SIZE,
                presale_seeds,
                &rent,
            )?;

            let presale = Presale::new(id, creator_key, terms, bump, custody_bump);
            store_presale(&presale, presale_info)?;

            // ── Fund custody up to the rent-exempt minimum ──────────────
            let top_up = custody_reserve.saturating_sub(custody_info.lamports());
            if top_up > 0 {
                system_program::transfer(
                    CpiContext::new(
                        system_info.clone(),
                        system_program::Transfer {
                            from: creator_info.clone(),
                            to: custody_info.clone(),
                        },
                    ),
                    top_up,
                )?;
            }

            msg!(
                "PRESALER: Presale {} opened by {}. Window {} to {}, price {}, supply {}",
                id,
                creator_key,
                terms.start_time,
                terms.end_time,
                terms.token_price,
                terms.token_supply
            );
            emit!(PresaleOpened {
                presale_id: id,
                creator: creator_key,
                token_mint: terms.token_mint,
                start_time: terms.start_time,
                end_time: terms.end_time,
                token_price: terms.token_price,
                token_supply: terms.token_supply,
            });
        }

        // ── Append ids to the creator index ─────────────────────────────
        let index = &mut ctx.accounts.creator_index;
        index.creator = creator_key;
        index.bump = ctx.bumps.creator_index;

        let index_info = index.to_account_info();
        let new_len = CreatorIndex::space_for(index.presale_ids.len() + batch.len());
        if new_len > index_info.data_len() {
            let top_up = rent
                .minimum_balance(new_len)
                .saturating_sub(index_info.lamports());
            if top_up > 0 {
                system_program::transfer(
                    CpiContext::new(
                        system_info,
                        system_program::Transfer {
                            from: creator_info,
                            to: index_info.clone(),
                        },
                    ),
                    top_up,
                )?;
            }
            index_info.realloc(new_len, false)?;
        }
        index.record(ids);

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 3. MY PRESALES (read-only)
    // ═════════════════════════════════════════════════════════════════════
    /// Returns the ids `creator` has opened, oldest first. Meant to be
    /// simulated; the ids come back as return data.
    pub fn my_presales(ctx: Context<MyPresales>, creator: Pubkey) -> Result<Vec<u64>> {
        let info = ctx.accounts.creator_index.to_account_info();
        if info.data_is_empty() {
            return Ok(Vec::new());
        }

        let index = CreatorIndex::try_deserialize(&mut &info.try_borrow_data()?[..])?;
        msg!(
            "PRESALER: {} has opened {} presales",
            creator,
            index.presale_ids.len()
        );
        Ok(index.presale_ids)
    }

    // ═════════════════════════════════════════════════════════════════════
    // 4. BUY
    // ═════════════════════════════════════════════════════════════════════
    /// Buyer sends `contributed_value` lamports to custody and immediately
    /// receives `contributed_value * token_price` tokens from the vault.
    ///
    /// The vault transfer is what enforces inventory: if the creator has not
    /// deposited enough tokens, the token program rejects it and the whole
    /// purchase is rolled back.
    pub fn buy(ctx: Context<Buy>, presale_id: u64, contributed_value: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let presale_info = ctx.accounts.presale.to_account_info();
        let mut presale = load_presale(&ctx.accounts.presale_registry, &presale_info, presale_id)?;
        require_keys_eq!(
            ctx.accounts.token_mint.key(),
            presale.token_mint,
            PresaleError::MintMismatch
        );

        let tokens = presale.purchase(now, contributed_value)?;

        // ── Transfer value from buyer to custody ────────────────────────
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.buyer.to_account_info(),
                    to: ctx.accounts.custody.to_account_info(),
                },
            ),
            contributed_value,
        )?;

        // ── Transfer tokens from the vault to the buyer ─────────────────
        let id_bytes = presale_id.to_le_bytes();
        let custody_seeds: &[&[u8]] = &[Presale::CUSTODY_SEED, &id_bytes, &[presale.custody_bump]];
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.token_vault.to_account_info(),
                    mint: ctx.accounts.token_mint.to_account_info(),
                    to: ctx.accounts.buyer_token_account.to_account_info(),
                    authority: ctx.accounts.custody.to_account_info(),
                },
                &[custody_seeds],
            ),
            tokens,
            ctx.accounts.token_mint.decimals,
        )?;

        store_presale(&presale, &presale_info)?;

        msg!(
            "PRESALER: Buyer {} contributed {} lamports to presale {} for {} tokens (sold: {}/{})",
            ctx.accounts.buyer.key(),
            contributed_value,
            presale_id,
            tokens,
            presale.amount_sold,
            presale.token_supply
        );
        emit!(TokensPurchased {
            presale_id,
            buyer: ctx.accounts.buyer.key(),
            contributed_value,
            tokens,
        });

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 5. WITHDRAW UNSOLD
    // ═════════════════════════════════════════════════════════════════════
    /// Creator reclaims unsold inventory once the window has closed. Succeeds
    /// exactly once; see `Presale::withdraw` for how finalization changes the
    /// amount.
    pub fn withdraw(ctx: Context<Withdraw>, presale_id: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let presale_info = ctx.accounts.presale.to_account_info();
        let mut presale = load_presale(&ctx.accounts.presale_registry, &presale_info, presale_id)?;
        require_keys_eq!(
            ctx.accounts.token_mint.key(),
            presale.token_mint,
            PresaleError::MintMismatch
        );

        let amount = presale.withdraw(
            &ctx.accounts.creator.key(),
            now,
            ctx.accounts.token_vault.amount,
        )?;

        if amount > 0 {
            let id_bytes = presale_id.to_le_bytes();
            let custody_seeds: &[&[u8]] =
                &[Presale::CUSTODY_SEED, &id_bytes, &[presale.custody_bump]];
            token_interface::transfer_checked(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    TransferChecked {
                        from: ctx.accounts.token_vault.to_account_info(),
                        mint: ctx.accounts.token_mint.to_account_info(),
                        to: ctx.accounts.creator_token_account.to_account_info(),
                        authority: ctx.accounts.custody.to_account_info(),
                    },
                    &[custody_seeds],
                ),
                amount,
                ctx.accounts.token_mint.decimals,
            )?;
        }

        store_presale(&presale, &presale_info)?;

        msg!(
            "PRESALER: Creator {} withdrew {} unsold tokens from presale {}",
            presale.creator,
            amount,
            presale_id
        );
        emit!(UnsoldWithdrawn {
            presale_id,
            creator: presale.creator,
            amount,
        });

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 6. END PRESALE
    // ═════════════════════════════════════════════════════════════════════
    /// Finalizes a closed presale. Anyone may call it so that a campaign
    /// cannot stall on an unresponsive creator.
    ///
    /// Pays the usage fee to the fee policy admin, then deposits the rest of
    /// the collected value together with the unsold inventory into the
    /// liquidity program. Pool-specific accounts are passed as remaining
    /// accounts and forwarded unchanged.
    pub fn end_presale<'info>(
        ctx: Context<'_, '_, 'info, 'info, EndPresale<'info>>,
        presale_id: u64,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let presale_info = ctx.accounts.presale.to_account_info();
        let mut presale = load_presale(&ctx.accounts.presale_registry, &presale_info, presale_id)?;
        require_keys_eq!(
            ctx.accounts.token_mint.key(),
            presale.token_mint,
            PresaleError::MintMismatch
        );

        let settlement = presale.finalize(
            now,
            &ctx.accounts.fee_policy,
            ctx.accounts.token_vault.amount,
        )?;

        let id_bytes = presale_id.to_le_bytes();
        let custody_seeds: &[&[u8]] = &[Presale::CUSTODY_SEED, &id_bytes, &[presale.custody_bump]];
        let custody_info = ctx.accounts.custody.to_account_info();
        let system_info = ctx.accounts.system_program.to_account_info();
        let admin_info = ctx.accounts.admin.to_account_info();

        // ── Platform fee ────────────────────────────────────────────────
        let rent_floor = Rent::get()?.minimum_balance(0);
        let fee_paid = settlement.payable_fee(admin_info.lamports(), rent_floor);
        if fee_paid < settlement.fee {
            msg!(
                "PRESALER: Fee of {} lamports kept in custody, admin {} cannot hold it",
                settlement.fee,
                admin_info.key()
            );
        }
        if fee_paid > 0 {
            system_program::transfer(
                CpiContext::new_with_signer(
                    system_info.clone(),
                    system_program::Transfer {
                        from: custody_info.clone(),
                        to: admin_info,
                    },
                    &[custody_seeds],
                ),
                fee_paid,
            )?;
        }

        // ── Seed liquidity ──────────────────────────────────────────────
        let token_vault_info = ctx.accounts.token_vault.to_account_info();
        let token_mint_info = ctx.accounts.token_mint.to_account_info();
        let token_program_info = ctx.accounts.token_program.to_account_info();
        liquidity::add_liquidity(
            &ctx.accounts.liquidity_program.to_account_info(),
            AddLiquidity {
                custody: &custody_info,
                token_vault: &token_vault_info,
                token_mint: &token_mint_info,
                token_program: &token_program_info,
                system_program: &system_info,
                pool_accounts: ctx.remaining_accounts,
            },
            AddLiquidityArgs {
                token_amount: settlement.liquidity_tokens,
                value_amount: settlement.liquidity_value,
                recipient: presale.creator,
            },
            &[custody_seeds],
        )?;

        store_presale(&presale, &presale_info)?;

        msg!(
            "PRESALER: Presale {} finalized by {}. fee={}, liquidity value={}, liquidity tokens={}",
            presale_id,
            ctx.accounts.caller.key(),
            fee_paid,
            settlement.liquidity_value,
            settlement.liquidity_tokens
        );
        emit!(PresaleFinalized {
            presale_id,
            caller: ctx.accounts.caller.key(),
            fee: fee_paid,
            liquidity_value: settlement.liquidity_value,
            liquidity_tokens: settlement.liquidity_tokens,
        });

        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 7. CHANGE USAGE FEE
    // ═════════════════════════════════════════════════════════════════════
    pub fn change_usage_fee(ctx: Context<ChangeUsageFee>, new_bps: u16) -> Result<()> {
        let fee_policy = &mut ctx.accounts.fee_policy;
        fee_policy.change_usage_fee(&ctx.accounts.admin.key(), new_bps)?;

        msg!("PRESALER: Usage fee changed to {} bps", new_bps);
        emit!(UsageFeeChanged {
            admin: fee_policy.admin,
            usage_fee_bps: new_bps,
        });

        Ok(())
    }
}

/// Deserializes a presale the registry has issued. Presale accounts are taken
/// unchecked so that an id that was never opened reports `UnknownPresale`
/// rather than an account-loading error.
fn load_presale(
    registry: &PresaleRegistry,
    presale_info: &AccountInfo,
    presale_id: u64,
) -> Result<Presale> {
    registry.ensure_issued(presale_id)?;
    require_keys_eq!(
        *presale_info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = presale_info.try_borrow_data()?;
    Presale::try_deserialize(&mut &data[..])
}

/// Creates a program-owned PDA of `space` bytes. Lamports already sent to the
/// address are kept and only the shortfall is paid, since `create_account`
/// refuses a funded target.
fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_info: &AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[u8]],
    rent: &Rent,
) -> Result<()> {
    let required = rent.minimum_balance(space);
    let current = target.lamports();
    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_info.clone(),
                system_program::CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                &[signer_seeds],
            ),
            required,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = required.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_info.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_info.clone(),
            system_program::Allocate {
                account_to_allocate: target.clone(),
            },
            &[signer_seeds],
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_info.clone(),
            system_program::Assign {
                account_to_assign: target.clone(),
            },
            &[signer_seeds],
        ),
        &crate::ID,
    )
}

fn store_presale(presale: &Presale, presale_info: &AccountInfo) -> Result<()> {
    let mut data = presale_info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data;
    presale.try_serialize(&mut dst)
}

// ═════════════════════════════════════════════════════════════════════════════
// ACCOUNT CONTEXTS
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = FeePolicy::MAX_SIZE,
        seeds = [FeePolicy::SEED],
        bump,
    )]
    pub fee_policy: Account<'info, FeePolicy>,

    #[account(
        init,
        payer = payer,
        space = PresaleRegistry::MAX_SIZE,
        seeds = [PresaleRegistry::SEED],
        bump,
    )]
    pub presale_registry: Account<'info, PresaleRegistry>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct OpenPresales<'info> {
    /// The presale creator, pays for every account created.
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [PresaleRegistry::SEED],
        bump = presale_registry.bump,
    )]
    pub presale_registry: Account<'info, PresaleRegistry>,

    /// Created empty on the creator's first batch, then grown per batch.
    #[account(
        init_if_needed,
        payer = creator,
        space = CreatorIndex::space_for(0),
        seeds = [CreatorIndex::SEED, creator.key().as_ref()],
        bump,
    )]
    pub creator_index: Account<'info, CreatorIndex>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(creator: Pubkey)]
pub struct MyPresales<'info> {
    /// Creator index PDA. May not exist if the creator never opened a presale.
    /// CHECK: address pinned by seeds; deserialized in the handler.
    #[account(
        seeds = [CreatorIndex::SEED, creator.as_ref()],
        bump,
    )]
    pub creator_index: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(presale_id: u64)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        seeds = [PresaleRegistry::SEED],
        bump = presale_registry.bump,
    )]
    pub presale_registry: Account<'info, PresaleRegistry>,

    /// CHECK: address pinned by seeds; loaded by `load_presale`.
    #[account(
        mut,
        seeds = [Presale::SEED, presale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale: UncheckedAccount<'info>,

    /// Custody PDA: receives the contributed lamports, owns the vault.
    #[account(
        mut,
        seeds = [Presale::CUSTODY_SEED, presale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub custody: SystemAccount<'info>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = token_mint,
        associated_token::authority = custody,
        associated_token::token_program = token_program,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = token_mint,
        associated_token::authority = buyer,
        associated_token::token_program = token_program,
    )]
    pub buyer_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(presale_id: u64)]
pub struct Withdraw<'info> {
    /// Must be the presale creator; checked against the loaded presale.
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [PresaleRegistry::SEED],
        bump = presale_registry.bump,
    )]
    pub presale_registry: Account<'info, PresaleRegistry>,

    /// CHECK: address pinned by seeds; loaded by `load_presale`.
    #[account(
        mut,
        seeds = [Presale::SEED, presale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale: UncheckedAccount<'info>,

    #[account(
        seeds = [Presale::CUSTODY_SEED, presale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub custody: SystemAccount<'info>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = token_mint,
        associated_token::authority = custody,
        associated_token::token_program = token_program,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = token_mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program,
    )]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(presale_id: u64)]
pub struct EndPresale<'info> {
    /// Anyone. Pays for the vault if it was never created.
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [FeePolicy::SEED],
        bump = fee_policy.bump,
    )]
    pub fee_policy: Account<'info, FeePolicy>,

    #[account(
        seeds = [PresaleRegistry::SEED],
        bump = presale_registry.bump,
    )]
    pub presale_registry: Account<'info, PresaleRegistry>,

    /// CHECK: address pinned by seeds; loaded by `load_presale`.
    #[account(
        mut,
        seeds = [Presale::SEED, presale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [Presale::CUSTODY_SEED, presale_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub custody: SystemAccount<'info>,

    /// Fee recipient.
    /// CHECK: must be the fee policy admin.
    #[account(mut, address = fee_policy.admin)]
    pub admin: UncheckedAccount<'info>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = caller,
        associated_token::mint = token_mint,
        associated_token::authority = custody,
        associated_token::token_program = token_program,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: must be the program configured in the registry.
    #[account(
        address = presale_registry.liquidity_program @ PresaleError::InvalidLiquidityProgram,
    )]
    pub liquidity_program: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ChangeUsageFee<'info> {
    /// Must be the fee policy admin; checked in `FeePolicy::change_usage_fee`.
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [FeePolicy::SEED],
        bump = fee_policy.bump,
    )]
    pub fee_policy: Account<'info, FeePolicy>,
}
