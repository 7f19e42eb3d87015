// === Storage Constants ===
pub mod storage {
    pub const SLOT_BASE_STORAGE: u64 = 96;
    pub const SLOT_MAX_STORAGE: u64 = 192;
    pub const RECORD_BASE_STORAGE: u64 = 160;
    pub const RECORD_MAX_STORAGE: u64 = 384;
}

// === Identifier Constants ===
pub mod ids {
    pub const MAX_ID_LENGTH: usize = 64;
}
