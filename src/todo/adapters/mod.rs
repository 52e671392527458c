//! Adapter implementations for todo storage ports.

pub mod fs;
pub mod memory;
