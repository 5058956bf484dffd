//! Address Records

use jiff::Timestamp;

use crate::{domain::owners::Owner, uuids::TypedUuid};

/// Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

/// Address Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub owner: Owner,
    pub label: String,
    pub address_line: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
