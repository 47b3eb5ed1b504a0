//! Reconciles the remote cryptocurrency catalog into a persisted CSV store.

#![deny(missing_docs)]

pub mod config;
pub mod store;
pub mod sync;
