//! Data models for invoices and configuration.

pub mod config;
pub mod invoice;
