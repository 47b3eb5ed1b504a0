//! Messari REST backend for the cryptocurrency catalog.

pub mod provider;
pub mod response;

pub use provider::MessariProvider;
