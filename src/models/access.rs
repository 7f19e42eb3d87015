use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::AccountId;
use schemars::JsonSchema;

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, PartialEq, Clone)]
#[serde(crate = "near_sdk::serde")]
pub enum AccessError {
    NotAdmin { action: String },
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAdmin { action } => {
                write!(f, "Only the administrator can {}", action)
            }
        }
    }
}

/// Authorization policy for administrative operations.
///
/// Holds the single administrator identity. The contract keeps one instance
/// in its state and hands it to every domain operation together with the
/// caller, so nothing here reads the execution environment.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct AccessControl {
    #[schemars(with = "String")]
    admin: AccountId,
}

impl AccessControl {
    pub fn new(admin: AccountId) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn is_admin(&self, caller: &AccountId) -> bool {
        *caller == self.admin
    }

    pub fn require_admin(&self, caller: &AccountId, action: &str) -> Result<(), AccessError> {
        if !self.is_admin(caller) {
            return Err(AccessError::NotAdmin { action: action.to_string() });
        }
        Ok(())
    }

    /// Returns the previous administrator on success.
    pub fn set_admin(&mut self, caller: &AccountId, new_admin: AccountId) -> Result<AccountId, AccessError> {
        self.require_admin(caller, "change the administrator")?;
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }
}
