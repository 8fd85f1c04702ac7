//! `FlowSpace` -- personal productivity sync client library.

pub mod cli;
pub mod config;
pub mod gateway;
pub mod identity;
pub mod store;
