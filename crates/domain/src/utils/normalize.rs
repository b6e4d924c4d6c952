//! Normalization of loosely typed upstream fields
//!
//! The scraper stores rows in a spreadsheet-like store, so flags and counters
//! frequently arrive as text (`"True"`, `"TRUE"`, `"12"`) and text columns may
//! arrive as `null`. These helpers convert them once, at deserialization, so
//! nothing downstream sees the raw representation.

use serde::{Deserialize, Deserializer, Serializer};

/// Literals accepted as "true", compared case-insensitively.
const TRUTHY_LITERALS: [&str; 3] = ["true", "1", "yes"];

/// Case-insensitive check against the known truthy literals.
pub fn is_truthy_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    TRUTHY_LITERALS.iter().any(|literal| trimmed.eq_ignore_ascii_case(literal))
}

/// Phone part of a WhatsApp-style id (`<phone>@<suffix>`).
///
/// Returns `None` for an empty phone part.
pub fn phone_from_jid(jid: &str) -> Option<&str> {
    jid.split('@').next().map(str::trim).filter(|phone| !phone.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

/// Serde adapter for flags that may arrive as bool, number or text
///
/// ```rust
/// use serde::Deserialize;
/// use wadash_domain::utils::normalize::truthy_flag;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, with = "truthy_flag")]
///     has_media: bool,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"has_media":"TRUE"}"#).unwrap();
/// assert!(row.has_media);
/// ```
pub mod truthy_flag {
    use super::*;

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<LooseScalar>::deserialize(deserializer)?;
        Ok(match raw {
            None => false,
            Some(LooseScalar::Bool(flag)) => flag,
            Some(LooseScalar::Unsigned(n)) => n != 0,
            Some(LooseScalar::Signed(n)) => n != 0,
            Some(LooseScalar::Float(n)) => n != 0.0,
            Some(LooseScalar::Text(text)) => is_truthy_flag(&text),
        })
    }
}

/// Serde adapter for non-negative counters that may arrive as text
///
/// `null` and blank text read as zero; anything non-numeric is an error.
pub mod lenient_count {
    use serde::de::Error as _;

    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<LooseScalar>::deserialize(deserializer)?;
        match raw {
            None => Ok(0),
            Some(LooseScalar::Unsigned(n)) => Ok(n),
            Some(LooseScalar::Signed(n)) => {
                u64::try_from(n).map_err(|_| D::Error::custom(format!("negative count: {n}")))
            }
            Some(LooseScalar::Float(n)) if n >= 0.0 && n.fract() == 0.0 => Ok(n as u64),
            Some(LooseScalar::Float(n)) => Err(D::Error::custom(format!("invalid count: {n}"))),
            Some(LooseScalar::Text(text)) if text.trim().is_empty() => Ok(0),
            Some(LooseScalar::Text(text)) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| D::Error::custom(format!("invalid count: {text:?}"))),
            Some(LooseScalar::Bool(_)) => Err(D::Error::custom("invalid count: boolean")),
        }
    }
}

/// Serde adapter reading `null` as an empty string
pub mod null_as_empty {
    use super::*;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(default, with = "truthy_flag")]
        flag: bool,
        #[serde(default, with = "lenient_count")]
        count: u64,
        #[serde(default, with = "null_as_empty")]
        label: String,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn truthy_literals_ignore_case() {
        for raw in ["True", "TRUE", "true", " yes ", "1"] {
            assert!(is_truthy_flag(raw), "{raw} should be truthy");
        }
        for raw in ["False", "", "no", "0", "maybe"] {
            assert!(!is_truthy_flag(raw), "{raw} should be falsy");
        }
    }

    #[test]
    fn flag_accepts_inconsistent_casing() {
        assert!(row(r#"{"flag":"True"}"#).flag);
        assert!(row(r#"{"flag":"TRUE"}"#).flag);
        assert!(row(r#"{"flag":true}"#).flag);
        assert!(!row(r#"{"flag":"False"}"#).flag);
        assert!(!row(r#"{"flag":null}"#).flag);
        assert!(!row("{}").flag);
    }

    #[test]
    fn count_accepts_numbers_and_numeric_text() {
        assert_eq!(row(r#"{"count":12}"#).count, 12);
        assert_eq!(row(r#"{"count":"12"}"#).count, 12);
        assert_eq!(row(r#"{"count":""}"#).count, 0);
        assert_eq!(row(r#"{"count":null}"#).count, 0);
    }

    #[test]
    fn count_rejects_garbage() {
        assert!(serde_json::from_str::<Row>(r#"{"count":"twelve"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"count":-3}"#).is_err());
    }

    #[test]
    fn null_text_reads_as_empty() {
        assert_eq!(row(r#"{"label":null}"#).label, "");
        assert_eq!(row(r#"{"label":"x"}"#).label, "x");
    }

    #[test]
    fn phone_is_taken_before_the_at_sign() {
        assert_eq!(phone_from_jid("5511999990000@c.us"), Some("5511999990000"));
        assert_eq!(phone_from_jid("5511999990000"), Some("5511999990000"));
        assert_eq!(phone_from_jid("@c.us"), None);
        assert_eq!(phone_from_jid(""), None);
    }
}
