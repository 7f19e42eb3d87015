use near_sdk::env;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{Deserialize, Serialize};
use schemars::JsonSchema;

use crate::models::config::ids::MAX_ID_LENGTH;

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Clone, PartialEq, Debug)]
#[serde(crate = "near_sdk::serde")]
pub enum StorageError {
    InsufficientBalance { required: u128, available: u128 },
    ExceedsMaxSize { size: u64, max_allowed: u64 }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientBalance { required, available } => {
                write!(f, "Insufficient balance: required {}, available {}", required, available)
            },
            Self::ExceedsMaxSize { size, max_allowed } => {
                write!(f, "Exceeds max size: size {}, max allowed {}", size, max_allowed)
            }
        }
    }
}

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize,
    Debug, Clone, PartialEq, JsonSchema)]
#[serde(crate = "near_sdk::serde")]
pub struct StorageMetrics {
    pub base_size: u64,
    pub dynamic_size: u64,
    pub total_bytes: u64,
    pub cost_per_byte: u128,
    pub total_cost: u128,
}

impl StorageMetrics {
    pub fn for_size(base_size: u64, dynamic_size: u64) -> Self {
        let total_bytes = base_size + dynamic_size;
        let cost_per_byte = env::storage_byte_cost().as_yoctonear();
        Self {
            base_size,
            dynamic_size,
            total_bytes,
            cost_per_byte,
            total_cost: cost_per_byte * total_bytes as u128,
        }
    }
}

pub trait Storable {
    const BASE_STORAGE: u64;
    const MAX_STORAGE: u64;

    fn calculate_storage_metrics(&self) -> StorageMetrics;

    fn validate_storage(&self) -> Result<(), StorageError> {
        let metrics = self.calculate_storage_metrics();

        if metrics.total_bytes > Self::MAX_STORAGE {
            return Err(StorageError::ExceedsMaxSize {
                size: metrics.total_bytes,
                max_allowed: Self::MAX_STORAGE,
            });
        }

        let available = env::account_balance().as_yoctonear();
        if available < metrics.total_cost {
            return Err(StorageError::InsufficientBalance {
                required: metrics.total_cost,
                available,
            });
        }

        Ok(())
    }
}

// === Identifier Validation ===
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierError {
    Empty { field: &'static str },
    TooLong { field: &'static str, current_length: usize },
    InvalidCharacters { field: &'static str },
}

impl std::fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, current_length } => write!(
                f,
                "{} is too long (length: {}, max: {})",
                field, current_length, MAX_ID_LENGTH
            ),
            Self::InvalidCharacters { field } => {
                write!(f, "{} contains control characters", field)
            }
        }
    }
}

/// Household, schedule and record ids are short opaque tokens.
pub fn validate_identifier(field: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty { field });
    }
    if value.len() > MAX_ID_LENGTH {
        return Err(IdentifierError::TooLong {
            field,
            current_length: value.len(),
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(IdentifierError::InvalidCharacters { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_bounds() {
        assert!(validate_identifier("record_id", "r1").is_ok());
        assert_eq!(
            validate_identifier("record_id", ""),
            Err(IdentifierError::Empty { field: "record_id" })
        );
        let long = "x".repeat(MAX_ID_LENGTH + 1);
        assert_eq!(
            validate_identifier("household_id", &long),
            Err(IdentifierError::TooLong {
                field: "household_id",
                current_length: MAX_ID_LENGTH + 1,
            })
        );
        assert!(validate_identifier("household_id", &"x".repeat(MAX_ID_LENGTH)).is_ok());
        assert_eq!(
            validate_identifier("schedule_id", "week\n1"),
            Err(IdentifierError::InvalidCharacters { field: "schedule_id" })
        );
    }
}
