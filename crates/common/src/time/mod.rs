//! Time utilities and abstractions
//!
//! - **[`clock`]**: real and mock monotonic clocks used for cache expiry
//! - **[`ttl`]**: TTL parsing for configuration values
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use chirp_common::time::{parse_ttl, Clock, MockClock};
//!
//! assert_eq!(parse_ttl("2m").unwrap(), Duration::from_secs(120));
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now() - start, Duration::from_secs(5));
//! ```

pub mod clock;
pub mod ttl;

pub use clock::{Clock, MockClock, SystemClock};
pub use ttl::{parse_ttl, TtlParseError};
