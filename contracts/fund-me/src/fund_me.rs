use soroban_sdk::{
    Address, BytesN, Env, Symbol, Vec, assert_with_error, contract, contractimpl, contracttype,
    symbol_short, token::TokenClient,
};

use crate::error::Error;
use crate::index_types::{Funded, Withdrawn};
use price_feed::{PriceData, PriceFeedClient};

/// Minimum contribution of 50 USD, carried at the native asset's 7-decimal scale
/// (the scale `get_conversion_rate` produces).
pub const MIN_USD: i128 = 50 * 10_000_000;

const STORAGE: Symbol = symbol_short!("STORAGE");

fn assert_positive(env: &Env, value: i128) {
    assert_with_error!(env, value >= 0, Error::ValueNotPositive);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FundMeStorage {
    /// Only address authorized to withdraw. Set at construction, never mutated.
    owner: Address,
    /// XLM Stellar Asset Contract address, for native value transfers
    xlm_sac: Address,
    /// Price feed contract quoting the native asset in USD
    price_feed: Address,
    /// Funder registry, in order first contributed; repeat funders appear once per call
    funders: Vec<Address>,
}

impl FundMeStorage {
    fn get_state(env: &Env) -> FundMeStorage {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    fn set_state(env: &Env, storage: &FundMeStorage) {
        env.storage().instance().set(&STORAGE, &storage);
    }
}

// Persistent storage keys
#[contracttype]
pub enum DataKey {
    /// Mapping of contributor addresses to their cumulative funded amount
    Funded(Address),
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    pub fn __constructor(env: &Env, owner: Address, xlm_sac: Address, price_feed: Address) {
        let state = FundMeStorage {
            owner,
            xlm_sac,
            price_feed,
            funders: Vec::new(env),
        };
        FundMeStorage::set_state(env, &state);
    }

    fn native(env: &Env) -> TokenClient<'_> {
        TokenClient::new(env, &FundMeStorage::get_state(env).xlm_sac)
    }

    fn feed(env: &Env) -> PriceFeedClient<'_> {
        PriceFeedClient::new(env, &FundMeStorage::get_state(env).price_feed)
    }

    /// Get the most recent price from the feed. Always queries live, never caches.
    fn latest_price(env: &Env) -> Result<PriceData, Error> {
        match Self::feed(env).try_latest_price() {
            Ok(price_data_option) => match price_data_option {
                core::prelude::v1::Ok(Some(PriceData { price, timestamp })) => {
                    Ok(PriceData { price, timestamp })
                }
                core::prelude::v1::Ok(None) => Err(Error::OraclePriceFetchFailed),
                Err(_) => Err(Error::OraclePriceFetchFailed),
            },
            Err(_) => Err(Error::OraclePriceFetchFailed),
        }
    }

    /// Get the number of decimals the feed's quoted price is scaled by.
    /// This is NOT the same as the number of decimals of the native asset.
    fn feed_decimals(env: &Env) -> Result<u32, Error> {
        match Self::feed(env).try_decimals() {
            Ok(decimals_result) => match decimals_result {
                core::prelude::v1::Ok(decimals) => Ok(decimals),
                Err(_) => Err(Error::OracleDecimalsFetchFailed),
            },
            Err(_) => Err(Error::OracleDecimalsFetchFailed),
        }
    }

    fn set_and_extend_funded(env: &Env, funder: Address, amount: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::Funded(funder.clone()), &amount);
        let ttl = env.storage().max_ttl();
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Funded(funder), ttl, ttl);
    }

    /// Convert a native-asset amount into USD terms at the current feed price,
    /// truncating toward zero. Result carries the native asset's decimal scale.
    pub fn get_conversion_rate(env: &Env, amount: i128) -> Result<i128, Error> {
        let PriceData { price, .. } = Self::latest_price(env)?;
        let decimals = Self::feed_decimals(env)?;
        let Some(scaled) = amount.checked_mul(price) else {
            return Err(Error::ArithmeticError);
        };
        Ok(scaled / 10i128.pow(decimals))
    }

    /// Contribute `amount` of the native asset. The USD value of the
    /// contribution, at the current feed price, must meet the 50 USD minimum.
    pub fn fund(env: &Env, funder: Address, amount: i128) -> Result<(), Error> {
        assert_positive(env, amount);
        funder.require_auth();

        let usd_value = Self::get_conversion_rate(env, amount)?;
        if usd_value < MIN_USD {
            return Err(Error::InsufficientFunds);
        }

        let _ = Self::native(env)
            .try_transfer(&funder, env.current_contract_address(), &amount)
            .map_err(|_| Error::TransferFailed)?;

        let funded: i128 = env
            .storage()
            .persistent()
            .get(&DataKey::Funded(funder.clone()))
            .unwrap_or(0);
        let Some(new_funded) = funded.checked_add(amount) else {
            return Err(Error::ArithmeticError);
        };
        Self::set_and_extend_funded(env, funder.clone(), new_funded);

        let mut state = FundMeStorage::get_state(env);
        state.funders.push_back(funder.clone());
        FundMeStorage::set_state(env, &state);

        Funded { funder, amount }.publish(env);
        Ok(())
    }

    /// Sweep the full held balance to the owner and reset all bookkeeping.
    pub fn withdraw(env: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let mut state = FundMeStorage::get_state(env);
        if caller != state.owner {
            return Err(Error::NotOwner);
        }

        let amount = Self::native(env).balance(&env.current_contract_address());

        // Bookkeeping is cleared before the outbound transfer, so re-entering
        // code cannot observe a registry that still holds swept contributions.
        // An Err return reverts every write made in this invocation.
        for funder in state.funders.iter() {
            env.storage().persistent().remove(&DataKey::Funded(funder));
        }
        state.funders = Vec::new(env);
        FundMeStorage::set_state(env, &state);

        let _ = Self::native(env)
            .try_transfer(&env.current_contract_address(), &state.owner, &amount)
            .map_err(|_| Error::TransferFailed)?;

        Withdrawn {
            owner: state.owner,
            amount,
        }
        .publish(env);
        Ok(())
    }

    /// Return the cumulative amount funded by `address`; 0 if it never funded
    pub fn get_address_to_amount_funded(env: &Env, address: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Funded(address))
            .unwrap_or(0)
    }

    /// Return the funder registry entry at `index`
    pub fn get_funder(env: &Env, index: u32) -> Result<Address, Error> {
        let state = FundMeStorage::get_state(env);
        state.funders.get(index).ok_or(Error::IndexOutOfRange)
    }

    pub fn get_owner(env: &Env) -> Address {
        FundMeStorage::get_state(env).owner
    }

    pub fn get_price_feed(env: &Env) -> Address {
        FundMeStorage::get_state(env).price_feed
    }

    pub fn minimum_usd() -> i128 {
        MIN_USD
    }

    /// Upgrade the contract to new wasm. Owner-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        FundMeStorage::get_state(env).owner.require_auth();
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }
}
