//! Pricing and cutting plans for two-sash PVC windows.
//!
//! - [`calculator`] prices a window from its geometry and material selection.
//! - [`solver`] assigns profile pieces to stock bars.
//! - [`aggregate`] merges the cost of many windows into one purchase list.

pub mod aggregate;
pub mod bar;
pub mod breakdown;
pub mod calculator;
pub mod catalog;
pub mod error;
pub mod materials;
pub mod pieces;
pub mod project;
pub mod render;
pub mod solver;
pub mod types;

pub use error::{Error, Result};
