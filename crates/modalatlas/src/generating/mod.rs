//! Random formula generation

pub mod random;

pub use random::{generate, generate_default, generate_for_logic, generate_seeded, RngSource};
