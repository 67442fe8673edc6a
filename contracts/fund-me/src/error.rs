use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Attached value converts to less than the USD minimum
    InsufficientFunds = 1,

    /// Only the owner may withdraw
    NotOwner = 2,

    /// Failed to transfer the native asset
    TransferFailed = 3,

    /// Funder registry read past bounds
    IndexOutOfRange = 4,

    /// Failed to fetch price data from the feed
    OraclePriceFetchFailed = 5,

    /// Failed to fetch decimals from the feed
    OracleDecimalsFetchFailed = 6,

    /// Value must be greater than or equal to 0
    ValueNotPositive = 7,

    /// Arithmetic overflow or underflow occurred
    ArithmeticError = 8,
}
