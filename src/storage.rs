use serde::de::DeserializeOwned;
use sled::Db;
use tracing::{debug, warn};

use crate::auth::{Credentials, Session, DEFAULT_ADMIN_PASSWORD, DEFAULT_USER_PASSWORD};
use crate::error::Result;
use crate::models::{EmergencyContact, VotingCenter};
use crate::seed;

pub const CENTERS_KEY: &str = "voting_centers_data_v3";
pub const EMERGENCY_CONTACT_KEY: &str = "emergency_contact";
pub const USER_PASSWORD_KEY: &str = "app_user_password";
pub const ADMIN_PASSWORD_KEY: &str = "app_admin_password";
pub const LOGGED_IN_KEY: &str = "app_logged_in";
pub const ADMIN_LOGGED_IN_KEY: &str = "app_admin_logged_in";

/// In-memory copy of every persisted slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slots {
    pub centers: Vec<VotingCenter>,
    pub emergency_contact: EmergencyContact, // SOS screen singleton
    pub credentials: Credentials,            // Stored as raw strings, not JSON
    pub session: Session,                    // "true"/"false" flags
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            centers: seed::default_centers(),
            emergency_contact: seed::default_emergency_contact(),
            credentials: Credentials::default(),
            session: Session::default(),
        }
    }
}

/// Sled-backed slot store. One writer per database directory.
#[derive(Clone)] // Sled handles are cheap to clone
pub struct Storage {
    db: Db,
    slots: sled::Tree,
}

impl Storage {
    /// Open or create the store at the given directory.
    pub fn open(path: &str) -> Result<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Store that is removed when dropped.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self> {
        let slots = db.open_tree("slots")?; // Key -> encoded slot value
        Ok(Self { db, slots })
    }

    /// Reads each slot independently, substituting its default when the slot
    /// is absent or cannot be decoded.
    pub fn load(&self) -> Result<Slots> {
        let defaults = Slots::default();
        let centers = self.read_json(CENTERS_KEY)?.unwrap_or(defaults.centers);
        let emergency_contact = self
            .read_json(EMERGENCY_CONTACT_KEY)?
            .unwrap_or(defaults.emergency_contact);
        let credentials = Credentials {
            user_password: self
                .read_string(USER_PASSWORD_KEY)?
                .unwrap_or_else(|| DEFAULT_USER_PASSWORD.to_string()),
            admin_password: self
                .read_string(ADMIN_PASSWORD_KEY)?
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
        };
        let session = Session {
            logged_in: self.read_flag(LOGGED_IN_KEY)?,
            admin_logged_in: self.read_flag(ADMIN_LOGGED_IN_KEY)?,
        };
        debug!(centers = centers.len(), "Loaded slots");
        Ok(Slots {
            centers,
            emergency_contact,
            credentials,
            session,
        })
    }

    /// Writes all slots in one atomic batch and flushes to disk.
    pub fn persist(&self, slots: &Slots) -> Result<()> {
        let mut batch = sled::Batch::default(); // All six slots land together or not at all
        batch.insert(CENTERS_KEY, serde_json::to_vec(&slots.centers)?);
        batch.insert(EMERGENCY_CONTACT_KEY, serde_json::to_vec(&slots.emergency_contact)?);
        batch.insert(USER_PASSWORD_KEY, slots.credentials.user_password.as_bytes());
        batch.insert(ADMIN_PASSWORD_KEY, slots.credentials.admin_password.as_bytes());
        batch.insert(LOGGED_IN_KEY, flag_bytes(slots.session.logged_in));
        batch.insert(ADMIN_LOGGED_IN_KEY, flag_bytes(slots.session.admin_logged_in));
        self.slots.apply_batch(batch)?;
        self.db.flush()?; // Survive a crash right after the command returns
        debug!(centers = slots.centers.len(), "Persisted slots");
        Ok(())
    }

    /// Overwrites every slot with its default value.
    pub fn reset(&self) -> Result<Slots> {
        let slots = Slots::default();
        self.persist(&slots)?;
        Ok(slots)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.slots.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(slot = key, error = %e, "Malformed slot, using default");
                Ok(None)
            }
        }
    }

    /// Empty or non-UTF-8 strings count as absent.
    fn read_string(&self, key: &str) -> Result<Option<String>> {
        let Some(bytes) = self.slots.get(key)? else {
            return Ok(None);
        };
        match String::from_utf8(bytes.to_vec()) {
            Ok(s) if !s.is_empty() => Ok(Some(s)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!(slot = key, error = %e, "Unreadable slot, using default");
                Ok(None)
            }
        }
    }

    fn read_flag(&self, key: &str) -> Result<bool> {
        Ok(self.slots.get(key)?.is_some_and(|bytes| &bytes[..] == b"true"))
    }

    #[cfg(test)]
    fn put_raw(&self, key: &str, value: &[u8]) {
        self.slots.insert(key, value).unwrap();
    }
}

fn flag_bytes(flag: bool) -> &'static [u8] {
    if flag {
        b"true"
    } else {
        b"false"
    }
}
