//! Host scene access.

/// Read-only scene-access contract.
pub mod access;
/// In-memory scene implementing the contract.
pub mod memory;
