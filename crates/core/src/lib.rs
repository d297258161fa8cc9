//! Functional core for cinebase: account types, validation rules and the
//! storage contracts implemented by the backends.

pub mod account;
pub mod storage;
