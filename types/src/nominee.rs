//! Nominee entity.

use serde::{Deserialize, Serialize};

use crate::ids::NomineeId;
use crate::state::{NomineeSource, NomineeStatus};

/// A person nominated to receive access to the holder's wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nominee {
    pub id: NomineeId,
    pub name: String,
    pub relationship: String,
    /// Date of birth as entered, e.g. "1992-04-17".
    pub dob: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Kind of identity document, e.g. "Aadhaar" or "PAN".
    #[serde(rename = "idType")]
    pub id_type: String,
    #[serde(rename = "idNumber")]
    pub id_number: String,
    pub status: NomineeStatus,
    pub source: NomineeSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_camel_case_id_fields() {
        let nominee = Nominee {
            id: NomineeId::new("nom_1"),
            name: "Asha".into(),
            relationship: "Spouse".into(),
            dob: "1990-01-01".into(),
            mobile: "9876543210".into(),
            email: None,
            id_type: "PAN".into(),
            id_number: "ABCDE1234F".into(),
            status: NomineeStatus::PendingConsent,
            source: NomineeSource::Manual,
        };
        let json = serde_json::to_string(&nominee).unwrap();
        assert!(json.contains("\"idType\":\"PAN\""));
        assert!(json.contains("\"idNumber\":\"ABCDE1234F\""));
        assert!(!json.contains("email"));
    }
}
