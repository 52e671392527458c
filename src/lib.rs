//! Toist: a small persistent todo list.
//!
//! This crate provides the todo store, its persistence to a local key-value
//! medium, and a text view used by the `toist` command-line front end.
//!
//! # Architecture
//!
//! Toist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure list operations with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete storage implementations (files, memory)
//!
//! # Modules
//!
//! - [`todo`]: Todo records, list operations, persistence, and rendering

pub mod todo;
