#![no_std]

//! Building blocks shared by the Veline contracts.
//!
//! Every function here runs inside a contract invocation and reads or writes
//! the calling contract's storage. None of them authorize callers on their
//! own; the wrapping contract decides who may reach them, usually through
//! [`access`].

pub mod access;
pub mod claims;
pub mod constants;
pub mod error;
pub mod escrow;
pub mod events;
pub mod merkle;
pub mod storage;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


pub use error::Error;
pub use escrow::{EscrowAccount, EscrowTotals};
