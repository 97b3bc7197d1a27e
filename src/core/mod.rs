// src/core/mod.rs

pub mod a1;
pub mod sanitize;

pub use a1::A1Range;
