//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Mock backend helpers (wiremock)
//! - API client and wizard builders pointed at a mock backend
//! - Custom assertion macros
#![allow(dead_code, unused_imports, unused_macros)]

pub mod assertions;
pub mod mock_server;

// Re-export commonly used utilities
pub use mock_server::*;
