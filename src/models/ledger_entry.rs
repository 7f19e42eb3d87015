use schemars::JsonSchema;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq)]
pub enum HoursError {
    Overflow { total_hours: u64, delta: u64 },
    Underflow { total_hours: u64, delta: u64 },
}

impl std::fmt::Display for HoursError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overflow { total_hours, delta } => {
                write!(f, "Adding {} hours to total {} would overflow", delta, total_hours)
            },
            Self::Underflow { total_hours, delta } => {
                write!(f, "Removing {} hours from total {} would go below zero", delta, total_hours)
            }
        }
    }
}

/// Running per-household balance of contributed hours.
///
/// Never rebuilt from the records: each change to a record's hours is folded
/// in as a delta, so callers compute the new entry first and only write it
/// once every other check of the call has passed.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(crate = "near_sdk::serde")]
pub struct LedgerEntry {
    pub total_hours: u64,
    pub last_updated: u64,
}

impl LedgerEntry {
    pub fn credited(&self, hours: u64, now: u64) -> Result<Self, HoursError> {
        let total_hours = self.total_hours.checked_add(hours).ok_or(HoursError::Overflow {
            total_hours: self.total_hours,
            delta: hours,
        })?;
        Ok(Self { total_hours, last_updated: now })
    }

    pub fn debited(&self, hours: u64, now: u64) -> Result<Self, HoursError> {
        let total_hours = self.total_hours.checked_sub(hours).ok_or(HoursError::Underflow {
            total_hours: self.total_hours,
            delta: hours,
        })?;
        Ok(Self { total_hours, last_updated: now })
    }

    /// Moves the total by the signed difference between `old_hours` and
    /// `new_hours`.
    pub fn rebalanced(&self, old_hours: u64, new_hours: u64, now: u64) -> Result<Self, HoursError> {
        if new_hours > old_hours {
            self.credited(new_hours - old_hours, now)
        } else {
            self.debited(old_hours - new_hours, now)
        }
    }
}
