use schemars::JsonSchema;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};
use crate::models::traits::{
    Storable, StorageError, StorageMetrics,
    IdentifierError, validate_identifier};

use crate::models::config::storage::*;

pub type ScheduleId = String;
pub type HouseholdId = String;

// === Core State Enums ===
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, PartialEq, Eq, Clone, Copy)]
#[serde(crate = "near_sdk::serde")]
pub enum SlotStatus {
    Scheduled,
    Completed,
    Cancelled,
}

// === Error Hierarchy ===
#[derive(Debug, Clone, PartialEq)]
pub enum SlotError {
    Validation(IdentifierError),
    Storage(StorageError),
}

impl From<IdentifierError> for SlotError {
    fn from(err: IdentifierError) -> Self {
        SlotError::Validation(err)
    }
}

impl From<StorageError> for SlotError {
    fn from(err: StorageError) -> Self {
        SlotError::Storage(err)
    }
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(v) => write!(f, "Validation error: {}", v),
            Self::Storage(s) => write!(f, "Storage error: {}", s),
        }
    }
}

// === Core Data Structures ===
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, Clone, PartialEq, Eq, Hash)]
#[serde(crate = "near_sdk::serde")]
pub struct SlotKey {
    pub schedule_id: ScheduleId,
    pub date: u64,
}

impl SlotKey {
    pub fn new(schedule_id: ScheduleId, date: u64) -> Self {
        Self { schedule_id, date }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.schedule_id, self.date)
    }
}

/// Mirror of one care slot from the schedule service.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct Slot {
    pub schedule_id: ScheduleId,
    pub date: u64,
    pub household_id: HouseholdId,
    pub status: SlotStatus,
}

impl Slot {
    pub fn new(key: &SlotKey, household_id: HouseholdId, status: SlotStatus) -> Result<Self, SlotError> {
        validate_identifier("schedule_id", &key.schedule_id)?;
        validate_identifier("household_id", &household_id)?;

        let slot = Self {
            schedule_id: key.schedule_id.clone(),
            date: key.date,
            household_id,
            status,
        };
        slot.validate_storage()?;
        Ok(slot)
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.schedule_id.clone(), self.date)
    }

    pub fn is_assigned_to(&self, household_id: &str) -> bool {
        self.household_id == household_id
    }

    pub fn is_completed(&self) -> bool {
        self.status == SlotStatus::Completed
    }
}

impl Storable for Slot {
    const BASE_STORAGE: u64 = SLOT_BASE_STORAGE;
    const MAX_STORAGE: u64 = SLOT_MAX_STORAGE;

    fn calculate_storage_metrics(&self) -> StorageMetrics {
        let dynamic_size =
            self.schedule_id.len() as u64 +
            self.household_id.len() as u64;

        StorageMetrics::for_size(Self::BASE_STORAGE, dynamic_size)
    }
}
