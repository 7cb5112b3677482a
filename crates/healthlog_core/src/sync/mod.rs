//! Optional remote mirroring of the journal store.
//!
//! # Responsibility
//! - Define the push-only mirror SPI and its registry.
//!
//! # Invariants
//! - Mirroring is strictly one-way: local store -> remote full copy.
//! - Mirror failures never roll back or block a local write.

pub mod mirror;
