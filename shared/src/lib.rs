#![no_std]

pub mod access;
pub mod constants;
pub mod errors;
pub mod events;
pub mod interfaces;
pub mod oracle;
pub mod pausable;
pub mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use constants::*;
