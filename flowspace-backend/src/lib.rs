//! `FlowSpace` backend service library.
//!
//! Exposes the row-storage HTTP service for use in tests and embedding.
//! The service stores task, event, and note rows per user and restricts
//! every read and write to the rows owned by the authenticated caller.

pub mod auth;
pub mod config;
pub mod server;
pub mod store;
