use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AlreadyExists = 4,
    NotFound = 5,
    Expired = 6,
    NotYetExpired = 7,
    AlreadyClaimed = 8,
    InvalidProof = 9,
    OutOfRange = 10,
    ZeroWeight = 11,
    InsufficientWeight = 12,
    NoSlotsRemaining = 13,
    // Custody balance no longer matches the bookkeeping.
    BalanceMismatch = 14,
    NotLocked = 15,
    AlreadyLocked = 16,
    ArithmeticOverflow = 17,
    InvalidAsset = 18,
}
