pub mod api;
pub mod corrections;
pub mod logging;
pub mod matching;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

pub use corrections::{CarrierStatus, ComplianceStatus};

// Commonly used data models for matching functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: String,
    pub name: String,
    pub status: CarrierStatus,
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// `None` means the carrier never declared regions.
    #[serde(default)]
    pub operating_regions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Carrier {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: CarrierStatus,
        compliance_status: ComplianceStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            compliance_status,
            capabilities: Vec::new(),
            operating_regions: None,
            mc_number: None,
            dot_number: None,
            contact_email: None,
            rating: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
pub enum JobPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Shipment requirements a carrier is matched against. Only the capability and
/// region sets are scored; the rest travels along for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    pub id: String,
    #[serde(default)]
    pub required_capabilities: Vec<String>,
    #[serde(default)]
    pub required_regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<JobPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
