//! Macro for enums that travel as lowercase names
//!
//! Tabs, feed types and interaction kinds appear in cache keys and backend
//! queries as fixed lowercase strings. This macro generates `as_str`,
//! `Display` and a case-insensitive `FromStr` from one mapping.
//!
//! # Example
//!
//! ```rust
//! use chirp_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Audience {
//!     Everyone,
//!     Followers,
//! }
//!
//! impl_wire_name_conversions!(Audience {
//!     Everyone => "everyone",
//!     Followers => "followers",
//! });
//!
//! assert_eq!(Audience::Followers.as_str(), "followers");
//! assert_eq!("EVERYONE".parse::<Audience>(), Ok(Audience::Everyone));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a fieldless enum
///
/// Parsing ignores ASCII case; output is always the mapped string. The
/// mapped strings must be lowercase.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire name used in cache keys and queries
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
