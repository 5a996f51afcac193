//! Data access for the maps conveyor.
//!
//! Responsibilities:
//! - Provide HTTP adapters implementing `conveyor_core::DirectionsSource`.
//! - Encapsulate the wire format of the upstream directions service.
//!
//! Boundaries:
//! - Do not encode search rules (live in `conveyor-core`).
//! - Expose blocking entry points; async I/O stays internal.
//!
//! Invariants:
//! - Access keys never appear in logs or error messages.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
