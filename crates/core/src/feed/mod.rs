//! Timelines, country list, trending hashtags and search

pub mod ports;
pub mod search;
pub mod service;

pub use service::FeedService;
