//! Presentational components shared by every portal page.

pub mod components;

pub use components::*;
