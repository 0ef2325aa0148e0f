pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

pub const MIN_LOCK_SECONDS: u64 = 7 * SECONDS_PER_DAY;
pub const MAX_LOCK_SECONDS: u64 = 4 * SECONDS_PER_YEAR;

// Ledgers close roughly every 5 seconds: 17280 ledgers per day.
pub const LEDGERS_PER_DAY: u32 = 17280;
pub const INSTANCE_TTL: u32 = LEDGERS_PER_DAY * 30;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL - LEDGERS_PER_DAY;
pub const PERSISTENT_TTL: u32 = LEDGERS_PER_DAY * 90;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL - LEDGERS_PER_DAY;
