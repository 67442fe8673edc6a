use soroban_sdk::{Address, contractevent};

#[contractevent(topics = ["funded"], data_format = "single-value")]
pub struct Funded {
    #[topic]
    pub funder: Address,
    pub amount: i128,
}

#[contractevent(topics = ["withdrawn"], data_format = "single-value")]
pub struct Withdrawn {
    #[topic]
    pub owner: Address,
    pub amount: i128,
}
