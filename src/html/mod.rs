// file: src/html/mod.rs
// description: html output validation module exports
// reference: internal module organization

pub mod requirements;

pub use requirements::{check_minimum_requirements, enforce_minimum_requirements};
