//! Identity and access service library.
//!
//! Exposes the service's modules so integration tests can assemble the
//! router in-process over an in-memory store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod token;
