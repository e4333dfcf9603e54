//! Vault items on both sides of the storage boundary.
//!
//! A [`SecretItem`] is what the user types; a [`SealedItem`] is what the
//! server stores. The description stays plaintext so the server can search
//! it. Username and password only ever leave the client as envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{open, seal, DerivedKey};
use crate::error::{LynxError, Result};

/// A decrypted item, held in memory only.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretItem {
    description: String,
    username: Option<String>,
    password: String,
}

impl SecretItem {
    pub fn new(
        description: impl Into<String>,
        username: Option<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            username: username.filter(|u| !u.is_empty()),
            password: password.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Reject items the vault refuses to store.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(LynxError::InvalidInput(
                "Description cannot be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(LynxError::InvalidInput(
                "Password cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Encrypt into a new storable record.
    pub fn seal(&self, key: &DerivedKey) -> Result<SealedItem> {
        self.validate()?;
        let (username, password) = self.seal_fields(key)?;

        tracing::debug!(has_username = username.is_some(), "item sealed");
        Ok(SealedItem {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            description: self.description.clone(),
            username,
            password,
        })
    }

    fn seal_fields(&self, key: &DerivedKey) -> Result<(Option<String>, String)> {
        let username = match self.username.as_deref() {
            Some(name) if !name.is_empty() => Some(seal(key, name)?),
            _ => None,
        };
        let password = seal(key, &self.password)?;
        Ok((username, password))
    }
}

impl std::fmt::Debug for SecretItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretItem")
            .field("description", &self.description)
            .field("username", &self.username.as_ref().map(|_| "[REDACTED]"))
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A stored item. `username` and `password` are envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedItem {
    /// Opaque record identifier, kept verbatim.
    ///
    /// New items get a v4 UUID. Exported records carry `_id`, usually a
    /// 24-hex ObjectId, which is accepted as is.
    #[serde(alias = "_id")]
    pub id: String,

    /// Last write time
    pub date: DateTime<Utc>,

    /// Plaintext, searchable description
    pub description: String,

    /// Username envelope, absent when no username was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password envelope
    pub password: String,
}

impl SealedItem {
    /// Replace the contents of this record, keeping its id.
    pub fn reseal(&self, key: &DerivedKey, item: &SecretItem) -> Result<SealedItem> {
        item.validate()?;
        let (username, password) = item.seal_fields(key)?;
        Ok(SealedItem {
            id: self.id.clone(),
            date: Utc::now(),
            description: item.description.clone(),
            username,
            password,
        })
    }

    /// Decrypt both secret fields.
    ///
    /// # Errors
    ///
    /// Fails as a whole if either envelope is malformed or does not
    /// authenticate under `key`.
    pub fn open(&self, key: &DerivedKey) -> Result<SecretItem> {
        let username = match self.username.as_deref() {
            Some(envelope) if !envelope.is_empty() => Some(open(key, envelope)?),
            _ => None,
        };
        let password = open(key, &self.password)?;
        Ok(SecretItem {
            description: self.description.clone(),
            username,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{derive_key, Passphrase};

    fn key(passphrase: &str) -> DerivedKey {
        derive_key(&Passphrase::from(passphrase)).unwrap()
    }

    #[test]
    fn test_seal_and_open() {
        let key = key("master");
        let item = SecretItem::new("email", Some("me@example.com".to_string()), "hunter2");

        let sealed = item.seal(&key).unwrap();
        assert_eq!(sealed.description, "email");
        assert_ne!(sealed.password, "hunter2");
        assert!(sealed.username.as_deref().unwrap().contains('+'));

        assert_eq!(sealed.open(&key).unwrap(), item);
    }

    #[test]
    fn test_empty_username_not_encrypted() {
        let key = key("master");
        let item = SecretItem::new("wifi", Some(String::new()), "pw");
        let sealed = item.seal(&key).unwrap();
        assert!(sealed.username.is_none());
        assert_eq!(sealed.open(&key).unwrap().username(), None);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(matches!(
            SecretItem::new("  ", None, "pw").validate(),
            Err(LynxError::InvalidInput(_))
        ));
        assert!(matches!(
            SecretItem::new("bank", None, "").validate(),
            Err(LynxError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reseal_keeps_id() {
        let key = key("master");
        let sealed = SecretItem::new("bank", None, "old").seal(&key).unwrap();
        let updated = sealed
            .reseal(&key, &SecretItem::new("bank", None, "new"))
            .unwrap();

        assert_eq!(updated.id, sealed.id);
        assert_ne!(updated.password, sealed.password);
        assert_eq!(updated.open(&key).unwrap().password(), "new");
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let sealed = SecretItem::new("bank", None, "pw").seal(&key("right")).unwrap();
        assert!(matches!(
            sealed.open(&key("wrong")),
            Err(LynxError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_accepts_underscore_id() {
        let key = key("master");
        let sealed = SecretItem::new("bank", None, "pw").seal(&key).unwrap();
        let json = format!(
            r#"{{"_id":"{}","date":"2024-01-01T00:00:00Z","description":"bank","password":"{}"}}"#,
            sealed.id, sealed.password
        );

        let parsed: SealedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, sealed.id);
        assert!(parsed.username.is_none());
        assert_eq!(parsed.open(&key).unwrap().password(), "pw");
    }

    #[test]
    fn test_accepts_exported_record() {
        let key = key("master");
        let sealed = SecretItem::new("bank", None, "pw").seal(&key).unwrap();
        let json = format!(
            r#"[{{"_id":"65f1a2b3c4d5e6f708192a3b","date":"2024-03-13T10:00:00.000Z","description":"bank","username":"","password":"{}","__v":0}}]"#,
            sealed.password
        );

        let parsed: Vec<SealedItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "65f1a2b3c4d5e6f708192a3b");

        let opened = parsed[0].open(&key).unwrap();
        assert_eq!(opened.username(), None);
        assert_eq!(opened.password(), "pw");

        // Re-serializing keeps the id as given.
        let out = serde_json::to_string(&parsed[0]).unwrap();
        assert!(out.contains(r#""id":"65f1a2b3c4d5e6f708192a3b""#));
    }

    #[test]
    fn test_new_item_id_is_uuid() {
        let sealed = SecretItem::new("bank", None, "pw").seal(&key("master")).unwrap();
        assert!(Uuid::parse_str(&sealed.id).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let item = SecretItem::new("bank", Some("alice".to_string()), "hunter2");
        let debug = format!("{:?}", item);
        assert!(debug.contains("bank"));
        assert!(!debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
