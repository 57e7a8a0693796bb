use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Regulatory compliance category of a carrier.
///
/// Two vocabularies circulate for the same concept: the scoring one
/// (`Fully Compliant` / `Compliant` / `Issues` / `Non-Compliant`) and the
/// carrier-registry one (`Compliant` / `Action Required` / `Non-Compliant`).
/// Both normalize into this set; `Action Required` is treated as `Issues`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, IntoStaticStr,
)]
#[serde(from = "String", into = "&'static str")]
pub enum ComplianceStatus {
    #[strum(serialize = "Fully Compliant")]
    FullyCompliant,
    #[strum(serialize = "Compliant")]
    Compliant,
    #[strum(serialize = "Issues")]
    Issues,
    #[strum(serialize = "Non-Compliant")]
    NonCompliant,
    #[strum(serialize = "Unrecognized")]
    Unrecognized,
}

impl ComplianceStatus {
    /// Total over any input; unknown values become `Unrecognized`.
    pub fn normalize(raw: &str) -> Self {
        let key: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();
        let key = key.split_whitespace().collect::<Vec<_>>().join(" ");

        match key.as_str() {
            "fully compliant" | "full compliance" => ComplianceStatus::FullyCompliant,
            "compliant" => ComplianceStatus::Compliant,
            "issues" | "issue" | "action required" | "pending review" => ComplianceStatus::Issues,
            "non compliant" | "noncompliant" | "not compliant" => ComplianceStatus::NonCompliant,
            _ => ComplianceStatus::Unrecognized,
        }
    }

    pub fn is_non_compliant(&self) -> bool {
        matches!(self, ComplianceStatus::NonCompliant)
    }
}

impl From<String> for ComplianceStatus {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

impl From<&str> for ComplianceStatus {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scoring_vocabulary() {
        assert_eq!(
            ComplianceStatus::normalize("Fully Compliant"),
            ComplianceStatus::FullyCompliant
        );
        assert_eq!(ComplianceStatus::normalize("Compliant"), ComplianceStatus::Compliant);
        assert_eq!(ComplianceStatus::normalize("Issues"), ComplianceStatus::Issues);
        assert_eq!(
            ComplianceStatus::normalize("Non-Compliant"),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn folds_registry_vocabulary_and_casing() {
        assert_eq!(
            ComplianceStatus::normalize("Action Required"),
            ComplianceStatus::Issues
        );
        assert_eq!(
            ComplianceStatus::normalize("Non-compliant"),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            ComplianceStatus::normalize("  non_compliant "),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn unknown_values_are_unrecognized() {
        assert_eq!(ComplianceStatus::normalize("Pending"), ComplianceStatus::Unrecognized);
        assert_eq!(ComplianceStatus::normalize(""), ComplianceStatus::Unrecognized);
    }

    #[test]
    fn displays_canonical_labels() {
        assert_eq!(ComplianceStatus::FullyCompliant.to_string(), "Fully Compliant");
        assert_eq!(ComplianceStatus::NonCompliant.as_ref(), "Non-Compliant");
        assert_eq!(
            serde_json::to_string(&ComplianceStatus::Issues).unwrap(),
            "\"Issues\""
        );
    }
}
