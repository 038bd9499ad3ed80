//! Test doubles for the delivery boundary

pub mod mocks;

pub use mocks::RecordingSender;
