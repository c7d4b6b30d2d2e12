//! Core application modules
//!
//! This module contains configuration, constants, logging, the provider
//! clients, and the comparison pipeline.

pub mod comparator;
pub mod config;
pub mod constants;
pub mod history;
pub mod logging;
pub mod provider;
pub mod providers;
