pub mod traits;
pub mod access;
pub mod slot;
pub mod record;
pub mod ledger_entry;
pub mod config;

pub use config::*;

pub use access::{AccessControl, AccessError};

pub use slot::{Slot, SlotKey, SlotStatus, SlotError, ScheduleId, HouseholdId};

pub use record::{ContributionRecord, RecordId, RecordError};

pub use ledger_entry::{LedgerEntry, HoursError};

pub use traits::{Storable, StorageError, StorageMetrics,
                 IdentifierError, validate_identifier};
