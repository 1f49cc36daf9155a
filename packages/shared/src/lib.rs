//! Shared utilities for the Enza room synchronization server.

pub mod logger;
