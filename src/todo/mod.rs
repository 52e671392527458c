//! Todo list management for toist.
//!
//! A session owns an insertion-ordered list of todos that users add to,
//! complete, delete, and bulk-clear. The whole list is mirrored to a
//! key-value store after every change. The module follows hexagonal
//! architecture:
//!
//! - Domain types and pure list operations in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Session orchestration in [`services`]
//! - Text presentation in [`view`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod view;
