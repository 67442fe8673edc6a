#![no_std]

mod error;
pub mod fund_me;
mod index_types;

pub use error::Error;
pub use fund_me::{FundMe, FundMeClient, MIN_USD};
