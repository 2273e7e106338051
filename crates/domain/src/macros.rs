//! Conversions for domain token enums
//!
//! Token enums (`PrayerKind`, `BlockKind`, `Language`, ...) travel as
//! lowercase strings in config files and persisted rows. The macro below
//! derives the matching `Display`/`FromStr` pair from one variant table so
//! each enum's string form is declared in a single place.

/// Implement `Display` and `FromStr` for a token enum
///
/// `Display` emits the listed token verbatim; parsing lowercases its input
/// first, so any casing of a token is accepted. Unknown input errors with
/// the enum name and the offending string.
///
/// ```rust
/// use miqat_domain::impl_domain_token_conversions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub enum BlockKind {
///     Prayer,
///     Interstitial,
/// }
///
/// impl_domain_token_conversions!(BlockKind {
///     Prayer => "prayer",
///     Interstitial => "interstitial",
/// });
/// ```
#[macro_export]
macro_rules! impl_domain_token_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
