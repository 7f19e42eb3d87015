use near_sdk::{env, AccountId};

/// Who is calling and when, captured once at the contract boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct CallContext {
    pub caller: AccountId,
    /// Logical clock: block height of the call.
    pub now: u64,
}

impl CallContext {
    pub fn new(caller: AccountId, now: u64) -> Self {
        Self { caller, now }
    }

    pub fn from_env() -> Self {
        Self::new(env::predecessor_account_id(), env::block_height())
    }
}
