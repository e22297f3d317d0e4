//! Nominee management.
//!
//! Nominees arrive two ways: the manual form wizard (pending the nominee's
//! consent) or a simulated DigiLocker import (already verified). Removing a
//! nominee requires a [`ReauthApproval`].

use kavach_ledger::{AuditLog, LedgerContext};
use kavach_store::{read_list_or, JsonList, StorageKey};
use kavach_types::sanitize::{date_chars, digits_only};
use kavach_types::{
    AuditStatus, KavachError, Nominee, NomineeId, NomineeSource, NomineeStatus,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::reauth::ReauthApproval;
use crate::WalletError;

const MOBILE_DIGITS: usize = 10;

/// The manual form wizard's output.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NomineeDraft {
    pub name: String,
    pub relationship: String,
    pub dob: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "idType")]
    pub id_type: String,
    #[serde(rename = "idNumber")]
    pub id_number: String,
}

impl NomineeDraft {
    /// Normalise the typed values and reject obviously incomplete forms.
    fn into_nominee(self, id: NomineeId) -> Result<Nominee, KavachError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(KavachError::validation("name", "must not be empty"));
        }
        let relationship = self.relationship.trim().to_string();
        if relationship.is_empty() {
            return Err(KavachError::validation("relationship", "must not be empty"));
        }
        let mobile = digits_only(&self.mobile, MOBILE_DIGITS);
        if mobile.len() != MOBILE_DIGITS {
            return Err(KavachError::validation(
                "mobile",
                format!("expected {MOBILE_DIGITS} digits"),
            ));
        }
        let id_type = self.id_type.trim().to_string();
        if id_type.is_empty() {
            return Err(KavachError::validation("idType", "must not be empty"));
        }
        let id_number = self.id_number.trim().to_string();
        if id_number.is_empty() {
            return Err(KavachError::validation("idNumber", "must not be empty"));
        }
        let email = match self.email.map(|e| e.trim().to_string()) {
            Some(e) if e.is_empty() => None,
            Some(e) if !e.contains('@') => {
                return Err(KavachError::validation("email", "missing '@'"));
            }
            other => other,
        };

        Ok(Nominee {
            id,
            name,
            relationship,
            dob: date_chars(&self.dob, 10),
            mobile,
            email,
            id_type,
            id_number,
            status: NomineeStatus::PendingConsent,
            source: NomineeSource::Manual,
        })
    }
}

/// Nominees shown before anything has been stored.
pub fn default_nominees() -> Vec<Nominee> {
    vec![
        Nominee {
            id: NomineeId::new("nom_default_1"),
            name: "Priya Sharma".into(),
            relationship: "Spouse".into(),
            dob: "1991-08-12".into(),
            mobile: "9810012345".into(),
            email: Some("priya.sharma@example.in".into()),
            id_type: "Aadhaar".into(),
            id_number: "XXXX-XXXX-4821".into(),
            status: NomineeStatus::Verified,
            source: NomineeSource::Digilocker,
        },
        Nominee {
            id: NomineeId::new("nom_default_2"),
            name: "Rahul Sharma".into(),
            relationship: "Brother".into(),
            dob: "1995-02-03".into(),
            mobile: "9822098765".into(),
            email: None,
            id_type: "PAN".into(),
            id_number: "BQRPS7731K".into(),
            status: NomineeStatus::PendingConsent,
            source: NomineeSource::Manual,
        },
    ]
}

/// Family records the simulated DigiLocker fetch returns.
fn digilocker_family_records() -> Vec<(&'static str, &'static str, &'static str, &'static str, &'static str)> {
    // (name, relationship, dob, mobile, aadhaar)
    vec![
        ("Kamla Devi", "Mother", "1962-11-30", "9811122233", "XXXX-XXXX-1187"),
        ("Suresh Sharma", "Father", "1958-06-21", "9811144455", "XXXX-XXXX-9042"),
    ]
}

/// Reads and rewrites the stored nominee list.
#[derive(Clone)]
pub struct NomineeRegistry {
    ctx: LedgerContext,
    audit: AuditLog,
}

impl NomineeRegistry {
    pub fn new(ctx: LedgerContext, audit: AuditLog) -> Self {
        Self { ctx, audit }
    }

    /// All nominees. A missing or malformed list reads as the default pair;
    /// malformed entries are left out.
    pub fn list(&self) -> Result<Vec<Nominee>, WalletError> {
        Ok(read_list_or(
            self.ctx.store(),
            StorageKey::Nominees,
            default_nominees,
        )?)
    }

    /// Add a nominee from the manual form. The nominee still has to consent.
    pub fn add_manual(&self, draft: NomineeDraft) -> Result<Nominee, WalletError> {
        let nominee = draft.into_nominee(NomineeId::generate(self.ctx.random.as_ref()))?;

        let mut nominees = self.load()?;
        nominees.push(nominee.clone());
        nominees.save(self.ctx.store())?;

        self.audit.record(
            "Nominee Added",
            format!("{} ({}) added, awaiting consent", nominee.name, nominee.relationship),
            AuditStatus::Success,
        )?;
        info!(id = %nominee.id, "nominee added manually");
        Ok(nominee)
    }

    /// Pull family members from the simulated DigiLocker fetch.
    ///
    /// Records whose id number is already on file are skipped. Returns only
    /// the newly added nominees.
    pub fn import_from_digilocker(&self) -> Result<Vec<Nominee>, WalletError> {
        let mut nominees = self.load()?;
        let mut added = Vec::new();

        for (name, relationship, dob, mobile, aadhaar) in digilocker_family_records() {
            if nominees.iter().any(|n| n.id_number == aadhaar) {
                continue;
            }
            let nominee = Nominee {
                id: NomineeId::generate(self.ctx.random.as_ref()),
                name: name.into(),
                relationship: relationship.into(),
                dob: dob.into(),
                mobile: mobile.into(),
                email: None,
                id_type: "Aadhaar".into(),
                id_number: aadhaar.into(),
                status: NomineeStatus::Verified,
                source: NomineeSource::Digilocker,
            };
            nominees.push(nominee.clone());
            added.push(nominee);
        }

        if !added.is_empty() {
            nominees.save(self.ctx.store())?;
            self.audit.record(
                "Nominees Imported",
                format!("{} nominee(s) imported from DigiLocker", added.len()),
                AuditStatus::Success,
            )?;
        }
        info!(count = added.len(), "DigiLocker nominee import finished");
        Ok(added)
    }

    /// Remove the nominee `id`. Requires a completed re-authentication.
    pub fn remove(
        &self,
        id: &NomineeId,
        approval: &ReauthApproval,
    ) -> Result<Nominee, WalletError> {
        let mut nominees = self.load()?;
        let removed = nominees
            .remove_first(|n| &n.id == id)
            .ok_or_else(|| WalletError::NomineeNotFound(id.to_string()))?;
        nominees.save(self.ctx.store())?;

        self.audit.record(
            "Nominee Removed",
            format!(
                "{} removed after {} re-authentication",
                removed.name,
                approval.kind()
            ),
            AuditStatus::Warning,
        )?;
        info!(id = %id, "nominee removed");
        Ok(removed)
    }

    fn load(&self) -> Result<JsonList<Nominee>, WalletError> {
        Ok(JsonList::load(
            self.ctx.store(),
            StorageKey::Nominees,
            default_nominees,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reauth::{ReauthMethod, Reauthenticator};
    use kavach_nullables::{NullClock, NullRandom, NullStore};
    use kavach_store::KeyValueStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn registry(store: Arc<NullStore>) -> (NomineeRegistry, AuditLog, Reauthenticator) {
        let clock = Arc::new(NullClock::default());
        let ctx = LedgerContext::new(store, clock.clone(), Arc::new(NullRandom::default()));
        let audit = AuditLog::holder(ctx.clone());
        (
            NomineeRegistry::new(ctx, audit.clone()),
            audit,
            Reauthenticator::new(Duration::ZERO, clock),
        )
    }

    fn draft() -> NomineeDraft {
        NomineeDraft {
            name: " Anita Rao ".into(),
            relationship: "Sister".into(),
            dob: "1994/03/09".into(),
            mobile: "+91 98450 12345".into(),
            email: Some("".into()),
            id_type: "PAN".into(),
            id_number: "AKXPR4412M".into(),
        }
    }

    #[test]
    fn empty_store_shows_defaults() {
        let (nominees, _, _) = registry(Arc::new(NullStore::new()));
        assert_eq!(nominees.list().unwrap(), default_nominees());
    }

    #[test]
    fn manual_nominee_is_pending_consent() {
        let (nominees, audit, _) = registry(Arc::new(NullStore::new()));
        let added = nominees.add_manual(draft()).unwrap();
        assert_eq!(added.name, "Anita Rao");
        assert_eq!(added.mobile, "9198450123");
        assert_eq!(added.dob, "19940309");
        assert_eq!(added.email, None);
        assert_eq!(added.status, NomineeStatus::PendingConsent);
        assert_eq!(added.source, NomineeSource::Manual);
        assert_eq!(nominees.list().unwrap().len(), 3);
        assert_eq!(audit.latest().unwrap().unwrap().action, "Nominee Added");
    }

    #[test]
    fn short_mobile_is_rejected() {
        let (nominees, audit, _) = registry(Arc::new(NullStore::new()));
        let mut d = draft();
        d.mobile = "98450".into();
        assert!(matches!(
            nominees.add_manual(d),
            Err(WalletError::Validation(KavachError::Validation { field: "mobile", .. }))
        ));
        assert!(audit.entries().unwrap().is_empty());
    }

    #[test]
    fn digilocker_import_is_idempotent() {
        let (nominees, audit, _) = registry(Arc::new(NullStore::new()));
        let first = nominees.import_from_digilocker().unwrap();
        assert_eq!(first.len(), 2);
        assert!(first
            .iter()
            .all(|n| n.status == NomineeStatus::Verified && n.source == NomineeSource::Digilocker));

        let second = nominees.import_from_digilocker().unwrap();
        assert!(second.is_empty());
        assert_eq!(nominees.list().unwrap().len(), 4);
        assert_eq!(audit.entries().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_exactly_one_and_audits() {
        let store = Arc::new(NullStore::new());
        let (nominees, audit, reauth) = registry(store.clone());
        let before = nominees.list().unwrap();
        let target = before[0].id.clone();

        let approval = reauth.challenge(ReauthMethod::Biometric).await;
        let removed = nominees.remove(&target, &approval).unwrap();

        let after = nominees.list().unwrap();
        assert_eq!(removed.id, target);
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|n| n.id != target));

        let entries = audit.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "Nominee Removed");
        assert!(entries[0].details.contains("biometric"));
        assert!(store.get("kavach_nominees").unwrap().is_some());
    }

    #[tokio::test]
    async fn incomplete_stored_nominee_is_kept_across_writes() {
        let store = Arc::new(NullStore::with_entries([(
            "kavach_nominees",
            r#"[{"id":"nom_a","name":"Meera Iyer","relationship":"Mother","dob":"1960-01-01","mobile":"9000000001","idType":"PAN","idNumber":"AAAPI1111A","status":"verified","source":"manual"},{"id":"nom_b","name":"Old Record","status":"verified"}]"#,
        )]));
        let (nominees, _, reauth) = registry(store.clone());
        assert_eq!(nominees.list().unwrap().len(), 1);

        let added = nominees.add_manual(draft()).unwrap();
        nominees.import_from_digilocker().unwrap();
        let approval = reauth.challenge(ReauthMethod::Biometric).await;
        nominees.remove(&added.id, &approval).unwrap();

        let raw = store.get("kavach_nominees").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let ids: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], "nom_a");
        assert_eq!(ids[1], "nom_b");
        assert_eq!(value[1], serde_json::json!({"id":"nom_b","name":"Old Record","status":"verified"}));
        assert!(!ids.contains(&added.id.as_str()));
    }

    #[tokio::test]
    async fn removing_unknown_nominee_writes_nothing() {
        let store = Arc::new(NullStore::new());
        let (nominees, audit, reauth) = registry(store.clone());
        let approval = reauth.challenge(ReauthMethod::Pin("123456".into())).await;
        let err = nominees
            .remove(&NomineeId::new("nom_missing"), &approval)
            .unwrap_err();
        assert!(matches!(err, WalletError::NomineeNotFound(_)));
        assert!(audit.entries().unwrap().is_empty());
        assert_eq!(store.write_count(), 0);
    }
}
