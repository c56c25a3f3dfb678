//! Tweets, replies and per-user interactions

pub mod interactions;
pub mod ports;
pub mod service;
pub mod thread;

pub use service::TweetService;
