//! Adapters for the domain ports: session stores and dice.

pub mod dice;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
