#![no_std]

use soroban_sdk::{self, contracttype};

pub mod price_feed;
mod error;
mod feed;

pub use error::Error;
pub use feed::{IsPriceFeed, IsPriceFeedAdmin};
pub use price_feed::{PriceFeed, PriceFeedClient};

/// Price record returned by the feed
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,    // quoted asset price in USD, scaled by 10^decimals
    pub timestamp: u64, // recording timestamp
}
