#![allow(dead_code)]

use relay::{
    Address, Backend, CallContext, Dispatcher, DispatcherConfig, Output, Revert, Selector,
    StorageSchema, Word, testing::Accounts,
};

pub const DECIMALS: u32 = 18;

pub const fn tokens(amount: u128) -> u128 {
    amount * 10u128.pow(DECIMALS)
}

// ============================================================================
// Deployment
// ============================================================================

pub fn deploy() -> (Dispatcher, Accounts) {
    let accounts = Accounts::new();
    let dispatcher = Dispatcher::new(accounts.deployer, DispatcherConfig::new(accounts.moderator))
        .expect("valid config");
    (dispatcher, accounts)
}

/// Deploy a dispatcher with every token function routed.
pub fn deploy_token() -> (Dispatcher, Accounts, Address) {
    let (mut dispatcher, accounts) = deploy();
    let token = dispatcher.deploy_backend(TokenBackend);
    dispatcher
        .add_entries(accounts.moderator, &TokenBackend::SIGNATURES, token)
        .expect("token routes");
    (dispatcher, accounts, token)
}

/// Deploy a dispatcher with every staking function routed.
pub fn deploy_staking() -> (Dispatcher, Accounts, Address) {
    let (mut dispatcher, accounts) = deploy();
    let staking = dispatcher.deploy_backend(StakingBackend);
    dispatcher
        .add_entries(accounts.moderator, &StakingBackend::SIGNATURES, staking)
        .expect("staking routes");
    (dispatcher, accounts, staking)
}

// ============================================================================
// Token Backend
// ============================================================================

/// A minimal fungible token with 18 decimals.
pub struct TokenBackend;

impl TokenBackend {
    pub const SCHEMA: StorageSchema = StorageSchema::new("token");

    pub const SIGNATURES: [&'static str; 5] = [
        "initialize()",
        "owner()",
        "mintToken(uint256)",
        "transfer(address,uint256)",
        "balanceOf(address)",
    ];

    fn balance_slot(holder: Address) -> relay::Slot {
        Self::SCHEMA.slot("balances").mapping(holder)
    }
}

impl Backend for TokenBackend {
    async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
        let owner_slot = Self::SCHEMA.slot("owner");
        let selector = ctx.calldata().selector();
        let is = |signature: &str| selector == Selector::from_signature(signature);

        if is("initialize()") {
            let initialized = Self::SCHEMA.slot("initialized");
            ctx.require(ctx.load(&initialized).is_zero(), "Already initialized")?;
            ctx.store(initialized, true);
            ctx.store(owner_slot, ctx.caller());
            ctx.store(Self::SCHEMA.slot("decimals"), u128::from(DECIMALS));
            Ok(Output::empty())
        } else if is("owner()") {
            Ok(Output::word(ctx.load_address(&owner_slot)?))
        } else if is("mintToken(uint256)") {
            let owner = ctx.load_address(&owner_slot)?;
            ctx.require(ctx.caller() == owner, "Only owner can mint")?;
            let amount = ctx
                .calldata()
                .uint(0)?
                .checked_mul(10u128.pow(DECIMALS))
                .ok_or_else(|| Revert::new("Mint overflow"))?;
            let slot = Self::balance_slot(ctx.caller());
            let balance = ctx
                .load_u128(&slot)?
                .checked_add(amount)
                .ok_or_else(|| Revert::new("Mint overflow"))?;
            ctx.store(slot, balance);
            ctx.emit("Transfer", vec![Word::ZERO, Word::from(ctx.caller()), Word::from(amount)]);
            Ok(Output::empty())
        } else if is("transfer(address,uint256)") {
            let to = ctx.calldata().address(0)?;
            let amount = ctx.calldata().uint(1)?;
            let from_slot = Self::balance_slot(ctx.caller());
            let from_balance = ctx.load_u128(&from_slot)?;
            ctx.require(from_balance >= amount, "Insufficient balance")?;
            ctx.store(from_slot, from_balance - amount);
            let to_slot = Self::balance_slot(to);
            let to_balance = ctx
                .load_u128(&to_slot)?
                .checked_add(amount)
                .ok_or_else(|| Revert::new("Balance overflow"))?;
            ctx.store(to_slot, to_balance);
            ctx.emit(
                "Transfer",
                vec![Word::from(ctx.caller()), Word::from(to), Word::from(amount)],
            );
            Ok(Output::word(true))
        } else if is("balanceOf(address)") {
            let holder = ctx.calldata().address(0)?;
            Ok(Output::word(ctx.load_u128(&Self::balance_slot(holder))?))
        } else {
            Err(Revert::new("Unknown function"))
        }
    }

    fn schema(&self) -> StorageSchema {
        Self::SCHEMA
    }
}

// ============================================================================
// Staking Backend
// ============================================================================

/// Per-account staked balances.
pub struct StakingBackend;

impl StakingBackend {
    pub const SCHEMA: StorageSchema = StorageSchema::new("staking");

    pub const SIGNATURES: [&'static str; 3] =
        ["stake(uint256)", "unstake(uint256)", "getBalance(address)"];

    fn balance_slot(holder: Address) -> relay::Slot {
        Self::SCHEMA.slot("balances").mapping(holder)
    }
}

impl Backend for StakingBackend {
    async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
        let selector = ctx.calldata().selector();
        let is = |signature: &str| selector == Selector::from_signature(signature);

        if is("stake(uint256)") {
            let amount = ctx.calldata().uint(0)?;
            ctx.require(amount > 0, "Amount must be greater than 0")?;
            let slot = Self::balance_slot(ctx.caller());
            let balance = ctx
                .load_u128(&slot)?
                .checked_add(amount)
                .ok_or_else(|| Revert::new("Stake overflow"))?;
            ctx.store(slot, balance);
            ctx.emit("Staked", vec![Word::from(ctx.caller()), Word::from(amount)]);
            Ok(Output::empty())
        } else if is("unstake(uint256)") {
            let amount = ctx.calldata().uint(0)?;
            let slot = Self::balance_slot(ctx.caller());
            let balance = ctx.load_u128(&slot)?;
            ctx.require(amount > 0 && amount <= balance, "Invalid Amount")?;
            ctx.store(slot, balance - amount);
            ctx.emit("Unstaked", vec![Word::from(ctx.caller()), Word::from(amount)]);
            Ok(Output::empty())
        } else if is("getBalance(address)") {
            let holder = ctx.calldata().address(0)?;
            Ok(Output::word(ctx.load_u128(&Self::balance_slot(holder))?))
        } else {
            Err(Revert::new("Unknown function"))
        }
    }

    fn schema(&self) -> StorageSchema {
        Self::SCHEMA
    }
}
