//! Domain model for the phone book.
//!
//! # Responsibility
//! - Define the contact record shared by store, service and shell.
//!
//! # Invariants
//! - Every persisted contact is identified by a store-assigned `ContactId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod contact;
