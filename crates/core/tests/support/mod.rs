//! Shared test helpers for `chirp-core` integration tests.
//!
//! These helpers provide fixtures and in-memory mocks of the backend ports
//! so the service tests can focus on caching behaviour.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
