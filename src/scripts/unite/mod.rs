//! RPG Maker Unite exported project support.
pub mod event;
pub mod value;
