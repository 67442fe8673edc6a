use crate::PriceData;
use soroban_sdk::Env;

/// Consumer interface for a single-asset USD price feed
pub trait IsPriceFeed {
    /// Get the most recent quoted price, if any has been recorded
    fn latest_price(env: &Env) -> Option<PriceData>;

    /// Return the number of decimals the quoted price is scaled by
    fn decimals(env: &Env) -> u32;
}

/// Admin interface for the price feed
pub trait IsPriceFeedAdmin {
    /// Record a new price observation. Can be invoked only by the admin account.
    fn set_price(env: &Env, price: i128, timestamp: u64);
}
