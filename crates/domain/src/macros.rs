//! Macro for backend-owned string tags
//!
//! The backend owns several vocabularies (session status, member role, filter
//! mode, breaker state) and may add values at any time. These are modelled as
//! enums with named variants for the values the client reacts to plus an
//! `Other(String)` catch-all that keeps the raw text.
//!
//! # Example
//!
//! ```rust
//! use wadash_domain::impl_open_tag;
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! pub enum QueueState {
//!     Idle,
//!     Busy,
//!     Other(String),
//! }
//!
//! impl_open_tag!(QueueState {
//!     Idle => "idle",
//!     Busy => "busy",
//! });
//!
//! assert_eq!(QueueState::from("BUSY"), QueueState::Busy);
//! assert_eq!(QueueState::from("draining").as_str(), "draining");
//! ```

/// Implements string conversions and serde for an open tag enum
///
/// This macro generates:
/// - `as_str()`: the canonical wire text, or the raw text for `Other`
/// - `From<&str>` / `From<String>`: case-insensitive match on known values,
///   everything else lands in `Other` verbatim
/// - `Display`
/// - `Serialize` / `Deserialize` as a plain JSON string
///
/// The enum must declare an `Other(String)` variant.
#[macro_export]
macro_rules! impl_open_tag {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this tag.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $str,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<&str> for $enum_name {
            fn from(raw: &str) -> Self {
                $(
                    if raw.eq_ignore_ascii_case($str) {
                        return Self::$variant;
                    }
                )+
                Self::Other(raw.to_string())
            }
        }

        impl From<String> for $enum_name {
            fn from(raw: String) -> Self {
                Self::from(raw.as_str())
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(raw))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestTag {
        Ready,
        Draining,
        Other(String),
    }

    impl_open_tag!(TestTag {
        Ready => "ready",
        Draining => "draining",
    });

    #[test]
    fn known_values_match_case_insensitively() {
        assert_eq!(TestTag::from("ready"), TestTag::Ready);
        assert_eq!(TestTag::from("READY"), TestTag::Ready);
        assert_eq!(TestTag::from("Draining"), TestTag::Draining);
    }

    #[test]
    fn unknown_values_keep_raw_text() {
        let tag = TestTag::from("Rebalancing");
        assert_eq!(tag, TestTag::Other("Rebalancing".to_string()));
        assert_eq!(tag.to_string(), "Rebalancing");
    }

    #[test]
    fn serde_uses_plain_strings() {
        let tag: TestTag = serde_json::from_str(r#""draining""#).unwrap();
        assert_eq!(tag, TestTag::Draining);
        assert_eq!(serde_json::to_string(&TestTag::Ready).unwrap(), r#""ready""#);

        let other: TestTag = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), r#""paused""#);
    }

    #[test]
    fn non_string_is_rejected() {
        assert!(serde_json::from_str::<TestTag>("42").is_err());
    }
}
