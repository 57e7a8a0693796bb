use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Operational status of a carrier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, IntoStaticStr,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CarrierStatus {
    Active,
    Inactive,
    Issue,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusParseError {
    #[error("carrier status is empty")]
    Empty,
    #[error("unrecognized carrier status: {0}")]
    Unrecognized(String),
}

impl CarrierStatus {
    /// Raw status string → status. Case and surrounding whitespace are ignored.
    pub fn parse(raw: &str) -> Result<Self, StatusParseError> {
        let key = raw.trim().to_lowercase();
        if key.is_empty() {
            return Err(StatusParseError::Empty);
        }

        match key.as_str() {
            "active" | "enabled" => Ok(CarrierStatus::Active),
            "inactive" | "suspended" | "disabled" => Ok(CarrierStatus::Inactive),
            "issue" | "issues" | "flagged" | "on hold" | "on-hold" => Ok(CarrierStatus::Issue),
            _ => Err(StatusParseError::Unrecognized(raw.trim().to_string())),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CarrierStatus::Active)
    }
}

impl std::str::FromStr for CarrierStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CarrierStatus {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(CarrierStatus::parse("Active"), Ok(CarrierStatus::Active));
        assert_eq!(CarrierStatus::parse(" INACTIVE "), Ok(CarrierStatus::Inactive));
        assert_eq!(CarrierStatus::parse("Issue"), Ok(CarrierStatus::Issue));
    }

    #[test]
    fn maps_synonyms() {
        assert_eq!(CarrierStatus::parse("suspended"), Ok(CarrierStatus::Inactive));
        assert_eq!(CarrierStatus::parse("On Hold"), Ok(CarrierStatus::Issue));
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(CarrierStatus::parse("  "), Err(StatusParseError::Empty));
        assert_eq!(
            CarrierStatus::parse("retired"),
            Err(StatusParseError::Unrecognized("retired".into()))
        );
    }

    #[test]
    fn serde_uses_canonical_labels() {
        let status: CarrierStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, CarrierStatus::Active);
        assert_eq!(serde_json::to_string(&CarrierStatus::Issue).unwrap(), "\"Issue\"");
        assert!(serde_json::from_str::<CarrierStatus>("\"retired\"").is_err());
    }
}
