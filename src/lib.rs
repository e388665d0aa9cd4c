//! A Rust library for extracting, merging, applying and encrypting
//! RPG Maker Unite event translations.
pub mod output_scripts;
pub mod scripts;
pub mod types;
pub mod utils;

lazy_static::lazy_static! {
    pub static ref COUNTER: utils::counter::Counter = utils::counter::Counter::new();
}
