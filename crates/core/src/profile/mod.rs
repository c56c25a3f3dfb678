//! Profiles and the follow graph

pub mod ports;
pub mod service;

pub use service::ProfileService;
