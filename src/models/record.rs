use schemars::JsonSchema;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    AccountId};
use crate::models::traits::{
    Storable, StorageError, StorageMetrics,
    IdentifierError, validate_identifier};
use crate::models::slot::{HouseholdId, ScheduleId, SlotKey};

use crate::models::config::storage::*;

pub type RecordId = String;

// === Error Hierarchy ===
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    Validation(IdentifierError),
    Storage(StorageError),
}

impl From<IdentifierError> for RecordError {
    fn from(err: IdentifierError) -> Self {
        RecordError::Validation(err)
    }
}

impl From<StorageError> for RecordError {
    fn from(err: StorageError) -> Self {
        RecordError::Storage(err)
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(v) => write!(f, "Validation error: {}", v),
            Self::Storage(s) => write!(f, "Storage error: {}", s),
        }
    }
}

// === Core Data Structures ===
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema,
    Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct ContributionRecord {
    pub record_id: RecordId,
    pub household_id: HouseholdId,
    pub schedule_id: ScheduleId,
    pub date: u64,
    hours: u64,
    pub children_served: u32,
    pub verified: bool,
    #[schemars(with = "Option<String>")]
    pub verifier: Option<AccountId>,
    #[schemars(with = "String")]
    pub submitted_by: AccountId,
}

// === Core Implementations ===
impl ContributionRecord {
    /// Builds an unverified record for the given slot. Does not check the slot
    /// itself; that is the caller's job.
    pub fn new(
        record_id: &str,
        household_id: HouseholdId,
        slot: SlotKey,
        hours: u64,
        children_served: u32,
        submitted_by: AccountId,
    ) -> Result<Self, RecordError> {
        validate_identifier("record_id", record_id)?;
        validate_identifier("household_id", &household_id)?;
        validate_identifier("schedule_id", &slot.schedule_id)?;

        let record = Self {
            record_id: record_id.to_string(),
            household_id,
            schedule_id: slot.schedule_id,
            date: slot.date,
            hours,
            children_served,
            verified: false,
            verifier: None,
            submitted_by,
        };

        record.validate_storage()?;
        Ok(record)
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.schedule_id.clone(), self.date)
    }

    pub fn mark_verified(&mut self, verifier: AccountId) {
        self.verified = true;
        self.verifier = Some(verifier);
    }

    /// Replaces the hour value and marks the record verified by `verifier`.
    /// Returns the previous hour value.
    pub fn adjust_hours(&mut self, new_hours: u64, verifier: AccountId) -> u64 {
        let old_hours = std::mem::replace(&mut self.hours, new_hours);
        self.mark_verified(verifier);
        old_hours
    }
}

impl Storable for ContributionRecord {
    const BASE_STORAGE: u64 = RECORD_BASE_STORAGE;
    const MAX_STORAGE: u64 = RECORD_MAX_STORAGE;

    fn calculate_storage_metrics(&self) -> StorageMetrics {
        // verifier is counted at submitter length, it is filled in later
        let dynamic_size =
            self.record_id.len() as u64 +
            self.household_id.len() as u64 +
            self.schedule_id.len() as u64 +
            2 * self.submitted_by.as_str().len() as u64;

        StorageMetrics::for_size(Self::BASE_STORAGE, dynamic_size)
    }
}
