use std::ops::Range;

use anchor_lang::prelude::*;

use crate::errors::PresaleError;

/// One basis point is 1/10000 of the collected value.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound on presales opened by one `open_presales` call. Every presale
/// needs two accounts in the transaction, which caps the practical size.
pub const MAX_PRESALES_PER_BATCH: usize = 16;

// ─────────────────────────────────────────────────────────────────────────────
// FeePolicy: platform fee rate and the admin allowed to change it
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"fee_policy"]

#[account]
#[derive(Debug)]
pub struct FeePolicy {
    /// Receives finalization fees and is the only key that may change them.
    pub admin: Pubkey,

    /// Fee taken from collected value at finalization, in basis points.
    pub usage_fee_bps: u16,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl FeePolicy {
    pub const SEED: &'static [u8] = b"fee_policy";

    pub const MAX_SIZE: usize = 8  // discriminator
        + 32  // admin
        + 2   // usage_fee_bps
        + 1;  // bump

    pub fn validate_fee(usage_fee_bps: u16) -> Result<()> {
        require!(
            u64::from(usage_fee_bps) <= BPS_DENOMINATOR,
            PresaleError::InvalidFee
        );
        Ok(())
    }

    pub fn change_usage_fee(&mut self, caller: &Pubkey, new_bps: u16) -> Result<()> {
        require_keys_eq!(*caller, self.admin, PresaleError::Unauthorized);
        Self::validate_fee(new_bps)?;
        self.usage_fee_bps = new_bps;
        Ok(())
    }

    /// Platform fee on `collected_value`. Integer division rounds the fee down,
    /// so any remainder stays with the liquidity deposit.
    pub fn fee_on(&self, collected_value: u64) -> Result<u64> {
        let fee = u128::from(collected_value)
            .checked_mul(u128::from(self.usage_fee_bps))
            .ok_or(PresaleError::MathOverflow)?
            / u128::from(BPS_DENOMINATOR);
        u64::try_from(fee).map_err(|_| error!(PresaleError::MathOverflow))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PresaleRegistry: global id counter and the liquidity program to seed
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"presale_registry"]

#[account]
#[derive(Debug)]
pub struct PresaleRegistry {
    /// Id the next opened presale receives. Ids start at 0.
    pub presale_count: u64,

    /// Program invoked with `add_liquidity` when a presale is finalized.
    pub liquidity_program: Pubkey,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl PresaleRegistry {
    pub const SEED: &'static [u8] = b"presale_registry";

    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // presale_count
        + 32  // liquidity_program
        + 1;  // bump

    pub fn ensure_issued(&self, presale_id: u64) -> Result<()> {
        require!(presale_id < self.presale_count, PresaleError::UnknownPresale);
        Ok(())
    }

    /// Reserves `count` consecutive ids.
    pub fn issue_ids(&mut self, count: usize) -> Result<Range<u64>> {
        let first = self.presale_count;
        let next = u64::try_from(count)
            .ok()
            .and_then(|count| first.checked_add(count))
            .ok_or(PresaleError::MathOverflow)?;
        self.presale_count = next;
        Ok(first..next)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CreatorIndex: ids of every presale a creator opened, oldest first
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"creator_index", creator.key().as_ref()]

#[account]
#[derive(Debug)]
pub struct CreatorIndex {
    pub creator: Pubkey,

    /// Grows by reallocation on every `open_presales`.
    pub presale_ids: Vec<u64>,

    pub bump: u8,
}

impl CreatorIndex {
    pub const SEED: &'static [u8] = b"creator_index";

    /// Account size holding `ids` presale ids.
    pub const fn space_for(ids: usize) -> usize {
        8  // discriminator
            + 32  // creator
            + 4 + 8 * ids  // Vec<u64>
            + 1 // bump
    }

    pub fn record(&mut self, ids: Range<u64>) {
        self.presale_ids.extend(ids);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Presale: one fixed-price, fixed-window campaign
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"presale", id.to_le_bytes().as_ref()]
// Custody PDA seeds: [b"custody", id.to_le_bytes().as_ref()]
//
// Custody is a system-owned PDA. It holds contributed lamports and is the
// authority of the token vault, the associated token account of
// (token_mint, custody).

/// Where a presale stands relative to the clock. Never stored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PresalePhase {
    /// Window has not opened.
    Pending,
    /// Buyers can purchase.
    Active,
    /// Window is over; withdrawal and finalization are possible.
    Closed,
}

/// Inputs for one presale of an `open_presales` batch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PresaleTerms {
    pub start_time: i64,
    pub end_time: i64,
    pub token_price: u64,
    pub token_mint: Pubkey,
    pub token_supply: u64,
}

impl PresaleTerms {
    /// Zips the parallel batch arrays, rejecting the whole batch if any
    /// entry is invalid.
    pub fn collect(
        start_times: &[i64],
        end_times: &[i64],
        token_prices: &[u64],
        token_mints: &[Pubkey],
        token_supplies: &[u64],
    ) -> Result<Vec<PresaleTerms>> {
        let len = start_times.len();
        require!(
            end_times.len() == len
                && token_prices.len() == len
                && token_mints.len() == len
                && token_supplies.len() == len,
            PresaleError::LengthMismatch
        );
        require!(len <= MAX_PRESALES_PER_BATCH, PresaleError::BatchTooLarge);

        let mut terms = Vec::with_capacity(len);
        for i in 0..len {
            require!(end_times[i] > start_times[i], PresaleError::InvalidWindow);
            require!(token_prices[i] > 0, PresaleError::ZeroPrice);
            terms.push(PresaleTerms {
                start_time: start_times[i],
                end_time: end_times[i],
                token_price: token_prices[i],
                token_mint: token_mints[i],
                token_supply: token_supplies[i],
            });
        }
        Ok(terms)
    }
}

/// Value and token movements decided by `Presale::finalize`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Finalization {
    /// Lamports owed to the fee policy admin.
    pub fee: u64,
    /// Lamports deposited with the liquidity program.
    pub liquidity_value: u64,
    /// Tokens deposited with the liquidity program.
    pub liquidity_tokens: u64,
}

impl Finalization {
    /// Part of the fee that can be sent to an admin wallet holding
    /// `admin_lamports`. A wallet may not end below `rent_floor` unless it is
    /// empty, so a dust fee that cannot lift it there stays in custody.
    pub fn payable_fee(&self, admin_lamports: u64, rent_floor: u64) -> u64 {
        if admin_lamports.saturating_add(self.fee) >= rent_floor {
            self.fee
        } else {
            0
        }
    }
}

#[account]
#[derive(Debug)]
pub struct Presale {
    /// Sequential id assigned by the registry.
    pub id: u64,

    /// The wallet that opened this presale (owns withdrawal rights).
    pub creator: Pubkey,

    /// Mint of the token being sold.
    pub token_mint: Pubkey,

    /// Unix timestamp when the window opens.
    pub start_time: i64,

    /// Unix timestamp when the window closes. Always after `start_time`.
    pub end_time: i64,

    /// Tokens granted per lamport contributed.
    pub token_price: u64,

    /// Inventory committed to the sale.
    pub token_supply: u64,

    /// Tokens allocated to buyers so far. Never exceeds `token_supply`.
    pub amount_sold: u64,

    /// Lamports held in custody until finalization.
    pub collected_value: u64,

    /// Creator has reclaimed unsold inventory.
    pub withdrawn: bool,

    /// Presale has been finalized.
    pub ended: bool,

    /// Bump seed for this PDA.
    pub bump: u8,

    /// Bump seed for the custody PDA.
    pub custody_bump: u8,

    /// Reserved space for future upgrades (64 bytes).
    pub _reserved: [u8; 64],
}

impl Presale {
    pub const SEED: &'static [u8] = b"presale";
    pub const CUSTODY_SEED: &'static [u8] = b"custody";

    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // id
        + 32  // creator
        + 32  // token_mint
        + 8   // start_time
        + 8   // end_time
        + 8   // token_price
        + 8   // token_supply
        + 8   // amount_sold
        + 8   // collected_value
        + 1   // withdrawn
        + 1   // ended
        + 1   // bump
        + 1   // custody_bump
        + 64; // _reserved

    pub fn new(id: u64, creator: Pubkey, terms: &PresaleTerms, bump: u8, custody_bump: u8) -> Self {
        Self {
            id,
            creator,
            token_mint: terms.token_mint,
            start_time: terms.start_time,
            end_time: terms.end_time,
            token_price: terms.token_price,
            token_supply: terms.token_supply,
            amount_sold: 0,
            collected_value: 0,
            withdrawn: false,
            ended: false,
            bump,
            custody_bump,
            _reserved: [0u8; 64],
        }
    }

    pub fn phase(&self, now: i64) -> PresalePhase {
        if now < self.start_time {
            PresalePhase::Pending
        } else if now < self.end_time {
            PresalePhase::Active
        } else {
            PresalePhase::Closed
        }
    }

    /// Inventory not allocated to buyers.
    pub fn unsold(&self) -> Result<u64> {
        self.token_supply
            .checked_sub(self.amount_sold)
            .ok_or_else(|| error!(PresaleError::MathOverflow))
    }

    /// Records a purchase of `contributed_value` lamports and returns the
    /// token allocation. The token program's transfer out of custody is the
    /// authoritative inventory check; this only keeps the parallel
    /// accounting within `token_supply`.
    pub fn purchase(&mut self, now: i64, contributed_value: u64) -> Result<u64> {
        require!(
            self.phase(now) == PresalePhase::Active,
            PresaleError::NotActive
        );
        require!(!self.ended, PresaleError::Ended);

        let tokens = contributed_value
            .checked_mul(self.token_price)
            .ok_or(PresaleError::MathOverflow)?;
        let amount_sold = self
            .amount_sold
            .checked_add(tokens)
            .ok_or(PresaleError::MathOverflow)?;
        require!(
            amount_sold <= self.token_supply,
            PresaleError::InsufficientInventory
        );
        let collected_value = self
            .collected_value
            .checked_add(contributed_value)
            .ok_or(PresaleError::MathOverflow)?;

        self.amount_sold = amount_sold;
        self.collected_value = collected_value;
        Ok(tokens)
    }

    /// Marks unsold inventory as withdrawn and returns how many tokens go back
    /// to the creator.
    ///
    /// Before finalization that is `token_supply - amount_sold`, and any tokens
    /// deposited beyond `token_supply` stay in the vault for good. Finalization
    /// deposits the unsold amount the vault still holds, so afterwards the
    /// creator can only reclaim the residual `custody_balance` (possibly zero).
    pub fn withdraw(&mut self, caller: &Pubkey, now: i64, custody_balance: u64) -> Result<u64> {
        require_keys_eq!(*caller, self.creator, PresaleError::Unauthorized);
        require!(
            self.phase(now) == PresalePhase::Closed,
            PresaleError::NotEnded
        );
        require!(!self.withdrawn, PresaleError::AlreadyWithdrawn);

        let amount = if self.ended {
            custody_balance
        } else {
            self.unsold()?
        };
        self.withdrawn = true;
        Ok(amount)
    }

    /// Ends the presale. Callable by anyone once the window has closed.
    ///
    /// Deposits the unsold inventory still held in the vault, bounded by
    /// `custody_balance`, so an under-funded vault cannot block settlement of
    /// the collected value.
    pub fn finalize(
        &mut self,
        now: i64,
        fee_policy: &FeePolicy,
        custody_balance: u64,
    ) -> Result<Finalization> {
        require!(
            self.phase(now) == PresalePhase::Closed,
            PresaleError::NotEnded
        );
        require!(!self.ended, PresaleError::AlreadyEnded);

        let fee = fee_policy.fee_on(self.collected_value)?;
        let liquidity_value = self
            .collected_value
            .checked_sub(fee)
            .ok_or(PresaleError::MathOverflow)?;
        // A prior withdrawal already returned the unsold inventory.
        let liquidity_tokens = if self.withdrawn {
            0
        } else {
            self.unsold()?.min(custody_balance)
        };

        self.ended = true;
        Ok(Finalization {
            fee,
            liquidity_value,
            liquidity_tokens,
        })
    }
}
