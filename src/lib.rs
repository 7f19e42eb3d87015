use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use near_sdk::{
    near, env, PanicOnDefault, AccountId, BorshStorageKey,
    collections::{LookupMap, UnorderedSet},
};

pub mod models;
pub mod context;
pub mod events;
mod registry;
mod contributions;

use crate::context::CallContext;
use crate::models::{
    AccessControl, AccessError,

    Slot, SlotKey, SlotStatus, SlotError, ScheduleId, HouseholdId,

    ContributionRecord, RecordId, RecordError,

    LedgerEntry,

    StorageError, IdentifierError,
};

// === Storage Keys ===
#[derive(BorshSerialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub(crate) enum StorageKey {
    Slots,
    Records,
    Ledger,
    RecordsPerHousehold,
    HouseholdRecords { household_hash: Vec<u8> },
}

// === Return Types ===
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub enum Response<T, E> {
    Success(T),
    Error(E)
}

impl<T, E> Response<T, E> {
    pub fn from_result<E2>(result: Result<T, E2>, error_mapper: impl FnOnce(E2) -> E) -> Self {
        match result {
            Ok(t) => Response::Success(t),
            Err(e) => Response::Error(error_mapper(e)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl<T, E> From<Result<T, E>> for Response<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Response::from_result(result, |e| e)
    }
}

// === Core Error Types ===
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub enum ContractError {
    Unauthorized(String), // attempted action
    NotFound(String, String), // entity, id
    AlreadyExists(String, String), // entity, id
    SlotNotCompleted(String, SlotStatus), // slot, current status
    InvalidHours(String, String), // record id, message
    ValidationError(String, String, Option<String>), // entity, message, details
    StorageError(StorageError),
}

// === Type aliases for response types ===
pub type AdminActionResponse = Response<AccountId, ContractError>;
pub type SlotActionResponse = Response<SlotKey, ContractError>;
pub type ContributionActionResponse = Response<RecordId, ContractError>;
pub type LedgerEntryResponse = Response<LedgerEntry, ContractError>;

// === Error Conversion Implementations ===
impl From<StorageError> for ContractError {
    fn from(err: StorageError) -> Self {
        ContractError::StorageError(err)
    }
}

impl From<AccessError> for ContractError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotAdmin { action } => ContractError::Unauthorized(action),
        }
    }
}

impl ContractError {
    fn validation(entity: &str, err: IdentifierError) -> Self {
        ContractError::ValidationError(entity.to_string(), err.to_string(), None)
    }
}

impl From<SlotError> for ContractError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::Validation(err) => ContractError::validation("Slot", err),
            SlotError::Storage(err) => ContractError::StorageError(err),
        }
    }
}

impl From<RecordError> for ContractError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(err) => ContractError::validation("ContributionRecord", err),
            RecordError::Storage(err) => ContractError::StorageError(err),
        }
    }
}

// === Error Display Implementations ===
impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(action) => write!(f, "Unauthorized: cannot {}", action),
            Self::NotFound(entity, id) => write!(f, "{} not found: {}", entity, id),
            Self::AlreadyExists(entity, id) => write!(f, "{} already exists: {}", entity, id),
            Self::SlotNotCompleted(slot, status) => {
                write!(f, "Slot {} is not completed (current status: {:?})", slot, status)
            },
            Self::InvalidHours(record_id, message) => {
                write!(f, "Invalid hours for record {}: {}", record_id, message)
            },
            Self::ValidationError(entity, message, details) => {
                if let Some(detail) = details {
                    write!(f, "{} validation error: {} ({})", entity, message, detail)
                } else {
                    write!(f, "{} validation error: {}", entity, message)
                }
            },
            Self::StorageError(err) => write!(f, "Storage error: {}", err),
        }
    }
}

// === Core Data Structures ===
#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    access: AccessControl,
    slots: LookupMap<SlotKey, Slot>,
    records: LookupMap<RecordId, ContributionRecord>,
    ledger: LookupMap<HouseholdId, LedgerEntry>,
    records_per_household: LookupMap<HouseholdId, UnorderedSet<RecordId>>,
}

#[near]
impl Contract {
    /// `admin` defaults to the deploying account.
    #[init]
    pub fn new(admin: Option<AccountId>) -> Self {
        let admin = admin.unwrap_or_else(env::predecessor_account_id);
        Self {
            access: AccessControl::new(admin),
            slots: LookupMap::new(StorageKey::Slots),
            records: LookupMap::new(StorageKey::Records),
            ledger: LookupMap::new(StorageKey::Ledger),
            records_per_household: LookupMap::new(StorageKey::RecordsPerHousehold),
        }
    }

    // === Access Control ===
    pub fn get_admin(&self) -> AccountId {
        self.access.admin().clone()
    }

    pub fn is_admin(&self, account_id: AccountId) -> bool {
        self.access.is_admin(&account_id)
    }

    pub fn set_admin(&mut self, new_admin: AccountId) -> AdminActionResponse {
        let ctx = CallContext::from_env();
        self.internal_set_admin(&ctx, new_admin).into()
    }

    // === Slot Registry ===
    pub fn register_slot(
        &mut self,
        schedule_id: ScheduleId,
        date: u64,
        household_id: HouseholdId,
        status: SlotStatus,
    ) -> SlotActionResponse {
        let ctx = CallContext::from_env();
        self.internal_register_slot(&ctx, schedule_id, date, household_id, status).into()
    }

    pub fn update_slot_status(
        &mut self,
        schedule_id: ScheduleId,
        date: u64,
        new_status: SlotStatus,
    ) -> SlotActionResponse {
        let ctx = CallContext::from_env();
        self.internal_update_slot_status(&ctx, schedule_id, date, new_status).into()
    }

    pub fn get_slot(&self, schedule_id: ScheduleId, date: u64) -> Option<Slot> {
        self.slots.get(&SlotKey::new(schedule_id, date))
    }

    // === Contribution Tracking ===
    pub fn record_contribution(
        &mut self,
        record_id: RecordId,
        household_id: HouseholdId,
        schedule_id: ScheduleId,
        date: u64,
        hours: u64,
        children_served: u32,
    ) -> ContributionActionResponse {
        let ctx = CallContext::from_env();
        self.internal_record_contribution(
            &ctx,
            record_id,
            household_id,
            schedule_id,
            date,
            hours,
            children_served,
        ).into()
    }

    pub fn verify_contribution(&mut self, record_id: RecordId) -> ContributionActionResponse {
        let ctx = CallContext::from_env();
        self.internal_verify_contribution(&ctx, record_id).into()
    }

    pub fn adjust_contribution_hours(&mut self, record_id: RecordId, new_hours: u64) -> LedgerEntryResponse {
        let ctx = CallContext::from_env();
        self.internal_adjust_contribution_hours(&ctx, record_id, new_hours).into()
    }

    pub fn get_total_contribution(&self, household_id: HouseholdId) -> LedgerEntry {
        self.ledger.get(&household_id).unwrap_or_default()
    }

    pub fn get_contribution_record(&self, record_id: RecordId) -> Option<ContributionRecord> {
        self.records.get(&record_id)
    }

    pub fn get_contributions_by_household(&self, household_id: HouseholdId) -> Vec<ContributionRecord> {
        match self.records_per_household.get(&household_id) {
            Some(record_set) => record_set
                .iter()
                .filter_map(|record_id| self.records.get(&record_id))
                .collect(),
            None => Vec::new(),
        }
    }
}
