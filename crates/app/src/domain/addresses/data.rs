//! Address Data

use crate::domain::{addresses::records::AddressUuid, owners::Owner};

/// New Address Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub owner: Owner,
    pub label: String,
    pub address_line: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}
