use soroban_sdk::{
    Address, BytesN, Env, Symbol, assert_with_error, contract, contractimpl, contracttype,
    symbol_short,
};

use crate::PriceData;
use crate::error::Error;
use crate::feed::{IsPriceFeed, IsPriceFeedAdmin};

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
const STORAGE: Symbol = symbol_short!("STORAGE");

#[contracttype]
#[derive(Clone, Debug)]
pub struct PriceFeedStorage {
    /// Number of decimals the quoted price is scaled by
    decimals: u32,
    last_price: i128,
    last_timestamp: u64,
}

impl PriceFeedStorage {
    pub fn get_state(env: &Env) -> PriceFeedStorage {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    pub fn set_state(env: &Env, storage: &PriceFeedStorage) {
        env.storage().instance().set(&STORAGE, &storage);
    }
}

#[contract]
pub struct PriceFeed;

#[contractimpl]
impl PriceFeed {
    pub fn __constructor(
        env: &Env,
        admin: Address,
        decimals: u32,
        initial_price: i128,
    ) -> Result<(), Error> {
        if initial_price <= 0 {
            return Err(Error::InvalidPrice);
        }
        env.storage().instance().set(&ADMIN_KEY, &admin);
        let feed = PriceFeedStorage {
            decimals,
            last_price: initial_price,
            last_timestamp: env.ledger().timestamp(),
        };
        PriceFeedStorage::set_state(env, &feed);
        Ok(())
    }

    fn require_admin(env: &Env) {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN_KEY)
            .expect("Admin must be set");
        admin.require_auth();
    }

    /// Upgrade the contract to new wasm. Admin-only.
    pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) {
        Self::require_admin(env);
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }
}

#[contractimpl]
impl IsPriceFeedAdmin for PriceFeed {
    fn set_price(env: &Env, price: i128, timestamp: u64) {
        Self::require_admin(env);
        assert_with_error!(env, price > 0, Error::InvalidPrice);
        let mut state = PriceFeedStorage::get_state(env);
        state.last_price = price;
        state.last_timestamp = timestamp;
        PriceFeedStorage::set_state(env, &state);
    }
}

#[contractimpl]
impl IsPriceFeed for PriceFeed {
    fn latest_price(env: &Env) -> Option<PriceData> {
        let state = PriceFeedStorage::get_state(env);
        Some(PriceData {
            price: state.last_price,
            timestamp: state.last_timestamp,
        })
    }

    fn decimals(env: &Env) -> u32 {
        PriceFeedStorage::get_state(env).decimals
    }
}
