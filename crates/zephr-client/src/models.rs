//! Wire models for the Zephr user export.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the foreign-key attribute being synchronized. Also the final
/// segment of the update path.
pub const CRM_IDENTIFIER: &str = "crmIdentifier";

/// One element of the `/v3/user-export` response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExportEntry {
    pub user: UserRecord,
}

/// A Zephr user record as returned by the export endpoint.
///
/// The export carries more fields than we consume; unknown keys are
/// ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,

    #[serde(default)]
    pub identifiers: UserIdentifiers,

    /// Custom attributes. Absent or empty for users that never had one.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// Identifier block nested in each user record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserIdentifiers {
    #[serde(default)]
    pub email_address: String,
}

impl UserRecord {
    /// Whether the user carries at least one custom attribute.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Value of the CRM identifier attribute, empty string if unset.
    #[must_use]
    pub fn crm_identifier(&self) -> &str {
        self.attributes
            .get(CRM_IDENTIFIER)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
