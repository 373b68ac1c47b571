//! Runtime orchestration layer for geolabel.
//!
//! Hosts the single-writer session coordinator that serializes all workflow
//! commands and publishes atomic state snapshots to the UI layer.

pub mod coordinator;

pub use label_core as core;
pub use label_data as data;
