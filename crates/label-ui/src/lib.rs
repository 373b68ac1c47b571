//! Terminal UI layer for geolabel.
//!
//! Provides themes, the annotation progress bar, the screen header, the
//! annotate view, and the main application event loop built on top of
//! [`ratatui`] for labeling sample points in the terminal.

pub mod annotate_view;
pub mod app;
pub mod components;
pub mod themes;

pub use label_core as core;
