pub mod carrier_status;
pub mod compliance_status;
pub mod tags;

pub use carrier_status::{CarrierStatus, StatusParseError};
pub use compliance_status::ComplianceStatus;
pub use tags::{
    normalize_capability, normalize_capability_set, normalize_region, normalize_region_set,
};
