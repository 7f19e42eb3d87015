use near_sdk::{env, collections::UnorderedSet};

use crate::context::CallContext;
use crate::events::LedgerEvent;
use crate::models::{
    ContributionRecord, HouseholdId, LedgerEntry, RecordId, ScheduleId, SlotKey,
};
use crate::{Contract, ContractError, StorageKey};

// Every operation below runs all of its checks before the first storage
// write. A returned error leaves slots, records and ledger untouched.
impl Contract {
    /// Files a contribution against a completed slot and credits the hours to
    /// the slot's household.
    ///
    /// The claim is authorized by the slot assignment alone; the caller is
    /// recorded as `submitted_by` but is not checked against the household.
    pub(crate) fn internal_record_contribution(
        &mut self,
        ctx: &CallContext,
        record_id: RecordId,
        household_id: HouseholdId,
        schedule_id: ScheduleId,
        date: u64,
        hours: u64,
        children_served: u32,
    ) -> Result<RecordId, ContractError> {
        let key = SlotKey::new(schedule_id, date);
        let slot = self.slots.get(&key).ok_or_else(|| ContractError::NotFound(
            "Slot".to_string(),
            key.to_string()
        ))?;

        if !slot.is_assigned_to(&household_id) {
            return Err(ContractError::Unauthorized(format!(
                "record a contribution for {} on slot {}", household_id, key
            )));
        }

        if !slot.is_completed() {
            return Err(ContractError::SlotNotCompleted(key.to_string(), slot.status));
        }

        if self.records.contains_key(&record_id) {
            return Err(ContractError::AlreadyExists(
                "ContributionRecord".to_string(),
                record_id
            ));
        }

        let record = ContributionRecord::new(
            &record_id,
            household_id.clone(),
            key,
            hours,
            children_served,
            ctx.caller.clone(),
        )?;

        let entry = self.ledger
            .get(&household_id)
            .unwrap_or_default()
            .credited(hours, ctx.now)
            .map_err(|e| ContractError::InvalidHours(record_id.clone(), e.to_string()))?;

        self.records.insert(&record_id, &record);
        self.add_to_household_index(&household_id, &record_id);
        self.ledger.insert(&household_id, &entry);

        LedgerEvent::ContributionRecorded {
            record_id: record_id.clone(),
            household_id,
            hours,
            total_hours: entry.total_hours,
            submitted_by: ctx.caller.clone(),
        }.emit();
        Ok(record_id)
    }

    /// Marks a record as checked by the administrator. Balances are not
    /// affected.
    pub(crate) fn internal_verify_contribution(
        &mut self,
        ctx: &CallContext,
        record_id: RecordId,
    ) -> Result<RecordId, ContractError> {
        self.access.require_admin(&ctx.caller, "verify contributions")?;

        let mut record = self.find_record(&record_id)?;
        record.mark_verified(ctx.caller.clone());
        self.records.insert(&record_id, &record);

        LedgerEvent::ContributionVerified {
            record_id: record_id.clone(),
            verifier: ctx.caller.clone(),
        }.emit();
        Ok(record_id)
    }

    /// Corrects a record's hours and moves the household total by the
    /// difference. The record counts as verified by the adjusting admin.
    pub(crate) fn internal_adjust_contribution_hours(
        &mut self,
        ctx: &CallContext,
        record_id: RecordId,
        new_hours: u64,
    ) -> Result<LedgerEntry, ContractError> {
        self.access.require_admin(&ctx.caller, "adjust contribution hours")?;

        let mut record = self.find_record(&record_id)?;
        let household_id = record.household_id.clone();
        let current = self.ledger.get(&household_id).ok_or_else(|| ContractError::NotFound(
            "LedgerEntry".to_string(),
            household_id.clone()
        ))?;

        let old_hours = record.hours();
        let entry = current
            .rebalanced(old_hours, new_hours, ctx.now)
            .map_err(|e| ContractError::InvalidHours(record_id.clone(), e.to_string()))?;

        record.adjust_hours(new_hours, ctx.caller.clone());
        self.records.insert(&record_id, &record);
        self.ledger.insert(&household_id, &entry);

        LedgerEvent::ContributionAdjusted {
            record_id,
            household_id,
            old_hours,
            new_hours,
            total_hours: entry.total_hours,
            verifier: ctx.caller.clone(),
        }.emit();
        Ok(entry)
    }

    fn find_record(&self, record_id: &str) -> Result<ContributionRecord, ContractError> {
        self.records.get(&record_id.to_string()).ok_or_else(|| ContractError::NotFound(
            "ContributionRecord".to_string(),
            record_id.to_string()
        ))
    }

    fn add_to_household_index(&mut self, household_id: &HouseholdId, record_id: &RecordId) {
        let mut record_set = self.records_per_household
            .get(household_id)
            .unwrap_or_else(|| UnorderedSet::new(StorageKey::HouseholdRecords {
                household_hash: env::sha256(household_id.as_bytes()),
            }));
        record_set.insert(record_id);
        self.records_per_household.insert(household_id, &record_set);
    }
}
