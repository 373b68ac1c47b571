//! Data ingestion layer for geolabel.
//!
//! Responsible for discovering point CSV files, parsing delimited text into
//! validated [`label_core::models::SamplePoint`] lists, and synthesizing ids
//! for rows that arrive without one.

pub mod ingest;

pub use label_core as core;
