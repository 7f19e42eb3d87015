use near_sdk::{near, AccountId};

use crate::models::{HouseholdId, RecordId, ScheduleId, SlotStatus};

/// NEP-297 events, logged as `EVENT_JSON:{...}` after each successful
/// mutation.
#[near(event_json(standard = "care_ledger"))]
pub enum LedgerEvent {
    #[event_version("1.0.0")]
    AdminChanged {
        previous_admin: AccountId,
        new_admin: AccountId,
    },
    #[event_version("1.0.0")]
    SlotRegistered {
        schedule_id: ScheduleId,
        date: u64,
        household_id: HouseholdId,
        status: SlotStatus,
    },
    #[event_version("1.0.0")]
    SlotStatusUpdated {
        schedule_id: ScheduleId,
        date: u64,
        old_status: SlotStatus,
        new_status: SlotStatus,
    },
    #[event_version("1.0.0")]
    ContributionRecorded {
        record_id: RecordId,
        household_id: HouseholdId,
        hours: u64,
        total_hours: u64,
        submitted_by: AccountId,
    },
    #[event_version("1.0.0")]
    ContributionVerified {
        record_id: RecordId,
        verifier: AccountId,
    },
    #[event_version("1.0.0")]
    ContributionAdjusted {
        record_id: RecordId,
        household_id: HouseholdId,
        old_hours: u64,
        new_hours: u64,
        total_hours: u64,
        verifier: AccountId,
    },
}
