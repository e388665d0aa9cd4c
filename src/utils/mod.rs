pub mod counter;
pub mod envelope;
pub mod escape;
pub mod files;
pub mod lines;
