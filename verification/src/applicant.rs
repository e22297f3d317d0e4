//! Applicant details entered at the collector step.

use kavach_types::sanitize::{alphanumeric_upper, date_chars, digits_only};
use serde::{Deserialize, Serialize};

const PAN_LEN: usize = 10;
const PHONE_LEN: usize = 10;
const DOB_LEN: usize = 10;

/// PAN, phone and date of birth as typed by the officer.
///
/// Only format stripping is applied; the values play no part in any check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    pub pan: String,
    pub phone: String,
    pub dob: String,
}

impl ApplicantDetails {
    /// The one-click demo values.
    pub fn mock() -> Self {
        Self {
            pan: "ABCDE1234F".into(),
            phone: "9876543210".into(),
            dob: "1990-01-01".into(),
        }
    }

    /// Strip formatting: PAN to upper-case alphanumerics, phone to digits,
    /// DOB to digits and dashes, each capped at ten characters.
    pub fn sanitized(&self) -> Self {
        Self {
            pan: alphanumeric_upper(&self.pan, PAN_LEN),
            phone: digits_only(&self.phone, PHONE_LEN),
            dob: date_chars(&self.dob, DOB_LEN),
        }
    }

    /// PAN with all but the last four characters hidden, for logs.
    pub fn masked_pan(&self) -> String {
        let visible = self.pan.len().saturating_sub(4);
        self.pan
            .chars()
            .enumerate()
            .map(|(i, c)| if i < visible { 'X' } else { c })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_each_field() {
        let raw = ApplicantDetails {
            pan: "abcde-1234-f-extra".into(),
            phone: "+91 (987) 654-3210".into(),
            dob: "01/01/1990 ".into(),
        };
        let clean = raw.sanitized();
        assert_eq!(clean.pan, "ABCDE1234F");
        assert_eq!(clean.phone, "9198765432");
        assert_eq!(clean.dob, "01011990");
    }

    #[test]
    fn mock_is_already_clean() {
        assert_eq!(ApplicantDetails::mock().sanitized(), ApplicantDetails::mock());
    }

    #[test]
    fn masks_pan() {
        assert_eq!(ApplicantDetails::mock().masked_pan(), "XXXXXX234F");
    }
}
