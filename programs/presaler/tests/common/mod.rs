//! Runs the presaler program on a local bank next to the SPL token programs
//! and a mock liquidity pool.
#![allow(dead_code)]


use anchor_lang::solana_program::account_info::AccountInfo;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::{AccountDeserialize, AnchorDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::associated_token::spl_associated_token_account::{
    self, instruction::create_associated_token_account_idempotent,
};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::spl_token;
use presaler::state::{CreatorIndex, FeePolicy, Presale, PresaleRegistry, PresaleTerms};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::account::Account;
use solana_sdk::clock::Clock;
use solana_sdk::instruction::{AccountMeta, Instruction, InstructionError};
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};
use solana_sdk::{system_instruction, system_program};

pub const SOL: u64 = 1_000_000_000;

fn process_presaler(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    // The Anchor entrypoint ties the slice lifetime to the account lifetime.
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    presaler::entry(program_id, accounts, data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Addresses
// ─────────────────────────────────────────────────────────────────────────────

pub fn fee_policy_address() -> Pubkey {
    Pubkey::find_program_address(&[FeePolicy::SEED], &presaler::ID).0
}

pub fn registry_address() -> Pubkey {
    Pubkey::find_program_address(&[PresaleRegistry::SEED], &presaler::ID).0
}

pub fn presale_address(presale_id: u64) -> Pubkey {
    Pubkey::find_program_address(&[Presale::SEED, &presale_id.to_le_bytes()], &presaler::ID).0
}

pub fn custody_address(presale_id: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[Presale::CUSTODY_SEED, &presale_id.to_le_bytes()],
        &presaler::ID,
    )
    .0
}

pub fn creator_index_address(creator: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CreatorIndex::SEED, creator.as_ref()], &presaler::ID).0
}

/// Custom error code carried by a failed transaction.
pub fn custom_code(err: BanksClientError) -> u32 {
    let err = match err {
        BanksClientError::TransactionError(err) => err,
        BanksClientError::SimulationError { err, .. } => err,
        other => panic!("unexpected client error: {other:?}"),
    };
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
        other => panic!("expected a custom program error, got {other:?}"),
    }
}

/// Return data loses its trailing zero bytes on the way out of the bank, so
/// the borsh vector is padded back to its declared length.
fn decode_ids(mut data: Vec<u8>) -> Vec<u64> {
    if data.len() < 4 {
        data.resize(4, 0);
    }
    let len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    data.resize(4 + 8 * len, 0);
    Vec::<u64>::try_from_slice(&data).unwrap()
}

pub fn open_presales_ix(
    creator: &Pubkey,
    first_id: u64,
    start_times: Vec<i64>,
    end_times: Vec<i64>,
    token_prices: Vec<u64>,
    token_mints: Vec<Pubkey>,
    token_supplies: Vec<u64>,
) -> Instruction {
    let mut accounts = presaler::accounts::OpenPresales {
        creator: *creator,
        presale_registry: registry_address(),
        creator_index: creator_index_address(creator),
        system_program: system_program::ID,
    }
    .to_account_metas(None);
    for id in first_id..first_id + start_times.len() as u64 {
        accounts.push(AccountMeta::new(presale_address(id), false));
        accounts.push(AccountMeta::new(custody_address(id), false));
    }

    Instruction {
        program_id: presaler::ID,
        accounts,
        data: presaler::instruction::OpenPresales {
            start_times,
            end_times,
            token_prices,
            token_mints,
            token_supplies,
        }
        .data(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PresaleSuite
// ─────────────────────────────────────────────────────────────────────────────

pub struct PresaleSuite {
    pub context: ProgramTestContext,
    pub admin: Keypair,
    /// Classic SPL mint, 0 decimals, minted by the test payer.
    pub mint: Keypair,
    pub liquidity_program: Pubkey,
    /// Pool-owned wallet and token account the mock pool deposits into.
    pub pool_wallet: Pubkey,
}

impl PresaleSuite {
    /// Boots the bank and runs `initialize`. The admin wallet starts with
    /// `admin_lamports` (0 leaves it nonexistent).
    pub async fn start(usage_fee_bps: u16, admin_lamports: u64) -> Self {
        let liquidity_program = Pubkey::new_unique();
        let admin = Keypair::new();
        let pool_wallet = Pubkey::new_unique();

        let mut program_test = ProgramTest::default();
        program_test.prefer_bpf(false);
        program_test.add_program("presaler", presaler::ID, processor!(process_presaler));
        program_test.add_program(
            "mock_pool",
            liquidity_program,
            processor!(mock_pool::process_instruction),
        );
        if admin_lamports > 0 {
            program_test.add_account(
                admin.pubkey(),
                Account::new(admin_lamports, 0, &system_program::ID),
            );
        }
        program_test.add_account(pool_wallet, Account::new(SOL, 0, &system_program::ID));

        let context = program_test.start_with_context().await;
        let mut suite = Self {
            context,
            admin,
            mint: Keypair::new(),
            liquidity_program,
            pool_wallet,
        };

        let ix = Instruction {
            program_id: presaler::ID,
            accounts: presaler::accounts::Initialize {
                payer: suite.payer(),
                fee_policy: fee_policy_address(),
                presale_registry: registry_address(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: presaler::instruction::Initialize {
                admin: suite.admin.pubkey(),
                usage_fee_bps,
                liquidity_program,
            }
            .data(),
        };
        suite.process(&[ix], &[]).await.unwrap();

        suite.create_mint().await;
        let ix = create_associated_token_account_idempotent(
            &suite.payer(),
            &pool_wallet,
            &suite.mint.pubkey(),
            &spl_token::ID,
        );
        suite.process(&[ix], &[]).await.unwrap();

        suite
    }

    pub fn payer(&self) -> Pubkey {
        self.context.payer.pubkey()
    }

    pub fn mint_key(&self) -> Pubkey {
        self.mint.pubkey()
    }

    /// Sends one transaction paid by the test payer. Every call uses a fresh
    /// blockhash so repeated instructions are not deduplicated.
    pub async fn process(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let blockhash = self.context.get_new_latest_blockhash().await.unwrap();
        let mut tx = Transaction::new_with_payer(instructions, Some(&self.payer()));
        tx.partial_sign(&[&self.context.payer], blockhash);
        for signer in signers {
            tx.partial_sign(&[*signer], blockhash);
        }
        self.context.banks_client.process_transaction(tx).await
    }

    async fn create_mint(&mut self) {
        let rent = self.context.banks_client.get_rent().await.unwrap();
        let payer = self.payer();
        let mint = self.mint_key();
        let ixs = [
            system_instruction::create_account(
                &payer,
                &mint,
                rent.minimum_balance(spl_token::state::Mint::LEN),
                spl_token::state::Mint::LEN as u64,
                &spl_token::ID,
            ),
            spl_token::instruction::initialize_mint(&spl_token::ID, &mint, &payer, None, 0)
                .unwrap(),
        ];
        let mint_keypair = self.mint.insecure_clone();
        self.process(&ixs, &[&mint_keypair]).await.unwrap();
    }

    pub async fn new_wallet(&mut self, lamports: u64) -> Keypair {
        let wallet = Keypair::new();
        let ix = system_instruction::transfer(&self.payer(), &wallet.pubkey(), lamports);
        self.process(&[ix], &[]).await.unwrap();
        wallet
    }

    pub async fn transfer_lamports(&mut self, to: &Pubkey, lamports: u64) {
        let ix = system_instruction::transfer(&self.payer(), to, lamports);
        self.process(&[ix], &[]).await.unwrap();
    }

    // ── Clock ───────────────────────────────────────────────────────────

    pub async fn now(&mut self) -> i64 {
        let clock: Clock = self.context.banks_client.get_sysvar().await.unwrap();
        clock.unix_timestamp
    }

    pub async fn warp_to(&mut self, unix_timestamp: i64) {
        let mut clock: Clock = self.context.banks_client.get_sysvar().await.unwrap();
        clock.unix_timestamp = unix_timestamp;
        self.context.set_sysvar(&clock);
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub async fn account(&mut self, address: Pubkey) -> Option<Account> {
        self.context.banks_client.get_account(address).await.unwrap()
    }

    pub async fn lamports(&mut self, address: Pubkey) -> u64 {
        self.account(address).await.map_or(0, |account| account.lamports)
    }

    pub async fn min_rent(&mut self, space: usize) -> u64 {
        let rent = self.context.banks_client.get_rent().await.unwrap();
        rent.minimum_balance(space)
    }

    /// Balance of `owner`'s associated token account for the suite mint.
    pub async fn token_balance(&mut self, owner: Pubkey) -> u64 {
        let address = get_associated_token_address(&owner, &self.mint_key());
        match self.account(address).await {
            Some(account) => spl_token::state::Account::unpack(&account.data).unwrap().amount,
            None => 0,
        }
    }

    async fn read<T: AccountDeserialize>(&mut self, address: Pubkey) -> T {
        let account = self.account(address).await.expect("account exists");
        T::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn presale(&mut self, presale_id: u64) -> Presale {
        self.read(presale_address(presale_id)).await
    }

    pub async fn registry(&mut self) -> PresaleRegistry {
        self.read(registry_address()).await
    }

    pub async fn fee_policy(&mut self) -> FeePolicy {
        self.read(fee_policy_address()).await
    }

    /// Runs `my_presales` as a simulation and decodes its return data.
    pub async fn my_presales(&mut self, creator: Pubkey) -> Vec<u64> {
        let ix = Instruction {
            program_id: presaler::ID,
            accounts: presaler::accounts::MyPresales {
                creator_index: creator_index_address(&creator),
            }
            .to_account_metas(None),
            data: presaler::instruction::MyPresales { creator }.data(),
        };
        let blockhash = self.context.get_new_latest_blockhash().await.unwrap();
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.payer()),
            &[&self.context.payer],
            blockhash,
        );
        let simulation = self.context.banks_client.simulate_transaction(tx).await.unwrap();
        simulation
            .result
            .expect("simulation ran")
            .expect("my_presales succeeds");
        let data = simulation
            .simulation_details
            .and_then(|details| details.return_data)
            .map(|return_data| return_data.data)
            .unwrap_or_default();
        decode_ids(data)
    }

    // ── Presale instructions ────────────────────────────────────────────

    pub fn terms(&self, start_time: i64, end_time: i64, price: u64, supply: u64) -> PresaleTerms {
        PresaleTerms {
            start_time,
            end_time,
            token_price: price,
            token_mint: self.mint_key(),
            token_supply: supply,
        }
    }

    /// Opens `batch` and returns the ids it was given.
    pub async fn open_presales(
        &mut self,
        creator: &Keypair,
        batch: &[PresaleTerms],
    ) -> Result<Vec<u64>, BanksClientError> {
        let first_id = self.registry().await.presale_count;
        let ix = open_presales_ix(
            &creator.pubkey(),
            first_id,
            batch.iter().map(|terms| terms.start_time).collect(),
            batch.iter().map(|terms| terms.end_time).collect(),
            batch.iter().map(|terms| terms.token_price).collect(),
            batch.iter().map(|terms| terms.token_mint).collect(),
            batch.iter().map(|terms| terms.token_supply).collect(),
        );
        self.process(&[ix], &[creator]).await?;
        Ok((first_id..first_id + batch.len() as u64).collect())
    }

    /// Creator-side inventory deposit: mints straight into the custody vault.
    pub async fn deposit(&mut self, presale_id: u64, amount: u64) {
        let payer = self.payer();
        let mint = self.mint_key();
        let custody = custody_address(presale_id);
        let vault = get_associated_token_address(&custody, &mint);
        let ixs = [
            create_associated_token_account_idempotent(
                &payer,
                &custody,
                &mint,
                &spl_token::ID,
            ),
            spl_token::instruction::mint_to(&spl_token::ID, &mint, &vault, &payer, &[], amount)
                .unwrap(),
        ];
        self.process(&ixs, &[]).await.unwrap();
    }

    pub async fn buy(
        &mut self,
        buyer: &Keypair,
        presale_id: u64,
        contributed_value: u64,
    ) -> Result<(), BanksClientError> {
        let mint = self.mint_key();
        let custody = custody_address(presale_id);
        let ix = Instruction {
            program_id: presaler::ID,
            accounts: presaler::accounts::Buy {
                buyer: buyer.pubkey(),
                presale_registry: registry_address(),
                presale: presale_address(presale_id),
                custody,
                token_mint: mint,
                token_vault: get_associated_token_address(&custody, &mint),
                buyer_token_account: get_associated_token_address(&buyer.pubkey(), &mint),
                token_program: spl_token::ID,
                associated_token_program: spl_associated_token_account::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: presaler::instruction::Buy {
                presale_id,
                contributed_value,
            }
            .data(),
        };
        self.process(&[ix], &[buyer]).await
    }

    pub async fn withdraw(
        &mut self,
        creator: &Keypair,
        presale_id: u64,
    ) -> Result<(), BanksClientError> {
        let mint = self.mint_key();
        let custody = custody_address(presale_id);
        let ix = Instruction {
            program_id: presaler::ID,
            accounts: presaler::accounts::Withdraw {
                creator: creator.pubkey(),
                presale_registry: registry_address(),
                presale: presale_address(presale_id),
                custody,
                token_mint: mint,
                token_vault: get_associated_token_address(&custody, &mint),
                creator_token_account: get_associated_token_address(&creator.pubkey(), &mint),
                token_program: spl_token::ID,
                associated_token_program: spl_associated_token_account::ID,
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: presaler::instruction::Withdraw { presale_id }.data(),
        };
        self.process(&[ix], &[creator]).await
    }

    pub async fn end_presale(
        &mut self,
        caller: &Keypair,
        presale_id: u64,
    ) -> Result<(), BanksClientError> {
        let mint = self.mint_key();
        let custody = custody_address(presale_id);
        let mut accounts = presaler::accounts::EndPresale {
            caller: caller.pubkey(),
            fee_policy: fee_policy_address(),
            presale_registry: registry_address(),
            presale: presale_address(presale_id),
            custody,
            admin: self.admin.pubkey(),
            token_mint: mint,
            token_vault: get_associated_token_address(&custody, &mint),
            liquidity_program: self.liquidity_program,
            token_program: spl_token::ID,
            associated_token_program: spl_associated_token_account::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None);
        accounts.push(AccountMeta::new(self.pool_wallet, false));
        accounts.push(AccountMeta::new(
            get_associated_token_address(&self.pool_wallet, &mint),
            false,
        ));

        let ix = Instruction {
            program_id: presaler::ID,
            accounts,
            data: presaler::instruction::EndPresale { presale_id }.data(),
        };
        self.process(&[ix], &[caller]).await
    }

    pub async fn change_usage_fee(
        &mut self,
        admin: &Keypair,
        new_bps: u16,
    ) -> Result<(), BanksClientError> {
        let ix = Instruction {
            program_id: presaler::ID,
            accounts: presaler::accounts::ChangeUsageFee {
                admin: admin.pubkey(),
                fee_policy: fee_policy_address(),
            }
            .to_account_metas(None),
            data: presaler::instruction::ChangeUsageFee { new_bps }.data(),
        };
        self.process(&[ix], &[admin]).await
    }
}
