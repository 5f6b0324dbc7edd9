//! Tillbox - account/payment ledger behind a web admin surface
//!
//! This library provides the core functionality for the Tillbox ledger,
//! including database operations, session tokens, webhook signature
//! verification, the payment ingestion pipeline, and HTTP handlers.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod signature;
