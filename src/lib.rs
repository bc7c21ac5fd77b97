//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-channel`, `bridge-desktop`). Host shells can
//! depend on `storage-bridge-workspace` and enable the documented features
//! without needing to wire each crate individually.
