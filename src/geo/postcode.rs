use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GeoError;

/// Strip all whitespace and upper-case a raw postcode.
///
/// `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A normalized, non-empty UK postcode such as `SW1A1AA`.
///
/// Format validity beyond non-emptiness is left to the lookup service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Postcode(String);

impl Postcode {
    pub fn parse(raw: &str) -> Result<Self, GeoError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(GeoError::InvalidPostcode(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Postcode {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Postcode {
    type Error = GeoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Postcode> for String {
    fn from(p: Postcode) -> Self {
        p.0
    }
}

impl AsRef<str> for Postcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_spacing_and_case() {
        assert_eq!(normalize("sw1a 1aa"), "SW1A1AA");
        assert_eq!(normalize("SW1A1AA"), "SW1A1AA");
        assert_eq!(normalize("  e1\t1hj \n"), "E11HJ");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["sw1a 1aa", "E1 1HJ", "  n1 9gu", "", "ec1a 1bb  "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_equal_after_normalization() {
        let a = Postcode::parse("sw1a 1aa").unwrap();
        let b = Postcode::parse("SW1A1AA").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "SW1A1AA");
    }

    #[test]
    fn test_empty_postcode_rejected() {
        assert!(matches!(
            Postcode::parse("   "),
            Err(GeoError::InvalidPostcode(_))
        ));
        assert!("".parse::<Postcode>().is_err());
    }

    #[test]
    fn test_serde_normalizes() {
        let p: Postcode = serde_json::from_str("\"e1 1hj\"").unwrap();
        assert_eq!(p.as_str(), "E11HJ");
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"E11HJ\"");
        assert!(serde_json::from_str::<Postcode>("\" \"").is_err());
    }
}
