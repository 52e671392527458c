//! Step definitions for todo list behaviour scenarios.

pub mod world;

mod given;
