use near_sdk::AccountId;

use crate::context::CallContext;
use crate::events::LedgerEvent;
use crate::models::{HouseholdId, ScheduleId, Slot, SlotKey, SlotStatus};
use crate::{Contract, ContractError};

impl Contract {
    pub(crate) fn internal_set_admin(
        &mut self,
        ctx: &CallContext,
        new_admin: AccountId,
    ) -> Result<AccountId, ContractError> {
        let previous_admin = self.access.set_admin(&ctx.caller, new_admin.clone())?;

        LedgerEvent::AdminChanged {
            previous_admin,
            new_admin: new_admin.clone(),
        }.emit();
        Ok(new_admin)
    }

    /// Upserts the slot at `(schedule_id, date)`. Re-registering replaces the
    /// household and status wholesale.
    pub(crate) fn internal_register_slot(
        &mut self,
        ctx: &CallContext,
        schedule_id: ScheduleId,
        date: u64,
        household_id: HouseholdId,
        status: SlotStatus,
    ) -> Result<SlotKey, ContractError> {
        self.access.require_admin(&ctx.caller, "register slots")?;

        let key = SlotKey::new(schedule_id, date);
        let slot = Slot::new(&key, household_id, status)?;
        self.slots.insert(&key, &slot);

        LedgerEvent::SlotRegistered {
            schedule_id: key.schedule_id.clone(),
            date: key.date,
            household_id: slot.household_id,
            status: slot.status,
        }.emit();
        Ok(key)
    }

    pub(crate) fn internal_update_slot_status(
        &mut self,
        ctx: &CallContext,
        schedule_id: ScheduleId,
        date: u64,
        new_status: SlotStatus,
    ) -> Result<SlotKey, ContractError> {
        self.access.require_admin(&ctx.caller, "update slot status")?;

        let key = SlotKey::new(schedule_id, date);
        let mut slot = self.slots.get(&key).ok_or_else(|| ContractError::NotFound(
            "Slot".to_string(),
            key.to_string()
        ))?;

        let old_status = std::mem::replace(&mut slot.status, new_status);
        self.slots.insert(&key, &slot);

        LedgerEvent::SlotStatusUpdated {
            schedule_id: key.schedule_id.clone(),
            date: key.date,
            old_status,
            new_status,
        }.emit();
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use near_sdk::test_utils::{accounts, get_logs, VMContextBuilder};
    use near_sdk::testing_env;

    use super::*;

    fn setup() -> Contract {
        testing_env!(VMContextBuilder::new().predecessor_account_id(accounts(0)).build());
        Contract::new(None)
    }

    #[test]
    fn register_slot_is_an_upsert() {
        let mut contract = setup();
        let admin = CallContext::new(accounts(0), 10);

        contract.internal_register_slot(&admin, "schedule1".into(), 150, "A".into(), SlotStatus::Scheduled).unwrap();
        contract.internal_register_slot(&admin, "schedule1".into(), 150, "B".into(), SlotStatus::Completed).unwrap();

        let slot = contract.get_slot("schedule1".into(), 150).unwrap();
        assert_eq!(slot.household_id, "B");
        assert_eq!(slot.status, SlotStatus::Completed);
    }

    #[test]
    fn slot_writes_require_admin() {
        let mut contract = setup();
        let outsider = CallContext::new(accounts(1), 10);

        let err = contract
            .internal_register_slot(&outsider, "schedule1".into(), 150, "A".into(), SlotStatus::Completed)
            .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized(_)));
        assert!(contract.get_slot("schedule1".into(), 150).is_none());

        let admin = CallContext::new(accounts(0), 10);
        contract.internal_register_slot(&admin, "schedule1".into(), 150, "A".into(), SlotStatus::Scheduled).unwrap();
        let err = contract
            .internal_update_slot_status(&outsider, "schedule1".into(), 150, SlotStatus::Completed)
            .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized(_)));
        assert_eq!(contract.get_slot("schedule1".into(), 150).unwrap().status, SlotStatus::Scheduled);
    }

    #[test]
    fn update_status_only_touches_status() {
        let mut contract = setup();
        let admin = CallContext::new(accounts(0), 10);

        let err = contract
            .internal_update_slot_status(&admin, "schedule1".into(), 150, SlotStatus::Completed)
            .unwrap_err();
        assert_eq!(err, ContractError::NotFound("Slot".to_string(), "schedule1@150".to_string()));

        contract.internal_register_slot(&admin, "schedule1".into(), 150, "A".into(), SlotStatus::Scheduled).unwrap();
        contract.internal_update_slot_status(&admin, "schedule1".into(), 150, SlotStatus::Cancelled).unwrap();

        let slot = contract.get_slot("schedule1".into(), 150).unwrap();
        assert_eq!(slot.household_id, "A");
        assert_eq!(slot.status, SlotStatus::Cancelled);
    }

    #[test]
    fn invalid_identifiers_are_rejected_after_auth() {
        let mut contract = setup();
        let admin = CallContext::new(accounts(0), 10);

        let err = contract
            .internal_register_slot(&admin, "schedule1".into(), 150, "x".repeat(65), SlotStatus::Scheduled)
            .unwrap_err();
        assert!(matches!(err, ContractError::ValidationError(ref entity, _, None) if entity == "Slot"));
        assert!(contract.get_slot("schedule1".into(), 150).is_none());
    }

    #[test]
    fn admin_handover_emits_event() {
        let mut contract = setup();
        let admin = CallContext::new(accounts(0), 10);

        assert_eq!(contract.internal_set_admin(&admin, accounts(1)).unwrap(), accounts(1));
        assert_eq!(contract.get_admin(), accounts(1));
        assert!(contract.internal_set_admin(&admin, accounts(2)).is_err());

        let logs = get_logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("EVENT_JSON:"));
        assert!(logs[0].contains("admin_changed"));
    }
}
