//! Backup file format used by export and import.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DirectoryError, Result};
use crate::models::{EmergencyContact, VotingCenter};
use crate::storage::Slots;

/// Every field is optional on import; absent fields leave their slot alone.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centers: Option<Vec<VotingCenter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

impl Backup {
    pub fn from_slots(slots: &Slots) -> Self {
        Self {
            centers: Some(slots.centers.clone()),
            emergency_contact: Some(slots.emergency_contact.clone()),
            user_password: Some(slots.credentials.user_password.clone()),
            admin_password: Some(slots.credentials.admin_password.clone()),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(DirectoryError::MalformedImport)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces each slot present in the backup. Session flags are never touched
    /// and empty passwords are ignored.
    pub fn apply(self, slots: &mut Slots) {
        if let Some(centers) = self.centers {
            slots.centers = centers;
        }
        if let Some(contact) = self.emergency_contact {
            slots.emergency_contact = contact;
        }
        // Empty strings count as absent
        if let Some(password) = self.user_password.filter(|p| !p.is_empty()) {
            slots.credentials.user_password = password;
        }
        if let Some(password) = self.admin_password.filter(|p| !p.is_empty()) {
            slots.credentials.admin_password = password;
        }
    }
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("epz_army_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Resolves an export target: a directory gets today's date-stamped file name.
pub fn export_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(backup_file_name(chrono::Local::now().date_naive()))
    } else {
        target.to_path_buf()
    }
}

pub async fn write_backup(target: &Path, backup: &Backup) -> Result<PathBuf> {
    let path = export_path(target);
    tokio::fs::write(&path, backup.to_json()?).await?;
    info!(path = %path.display(), "Exported backup");
    Ok(path)
}

pub async fn read_backup(path: &Path) -> Result<Backup> {
    let text = tokio::fs::read_to_string(path).await?;
    Backup::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(backup_file_name(date), "epz_army_backup_2026-01-05.json");
    }

    #[test]
    fn test_export_contains_all_four_fields() {
        let json = Backup::from_slots(&Slots::default()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for field in ["centers", "emergencyContact", "userPassword", "adminPassword"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["centers"][0]["centerNumber"], "01");
    }

    #[test]
    fn test_partial_backup_only_touches_present_fields() {
        let backup = Backup::parse(r#"{"emergencyContact": {"name":"X","mobile":"123"}}"#).unwrap();
        let mut slots = Slots::default();
        slots.session.logged_in = true;
        let before = slots.clone();

        backup.apply(&mut slots);
        assert_eq!(slots.emergency_contact.name, "X");
        assert_eq!(slots.emergency_contact.mobile, "123");
        assert_eq!(slots.centers, before.centers);
        assert_eq!(slots.credentials, before.credentials);
        assert_eq!(slots.session, before.session);
    }

    #[test]
    fn test_empty_passwords_are_ignored() {
        let backup = Backup::parse(r#"{"userPassword": "", "adminPassword": "root"}"#).unwrap();
        let mut slots = Slots::default();
        backup.apply(&mut slots);
        assert_eq!(slots.credentials.user_password, "EPZArmy");
        assert_eq!(slots.credentials.admin_password, "root");
    }

    #[test]
    fn test_malformed_backup_is_reported() {
        assert!(matches!(Backup::parse("{oops"), Err(DirectoryError::MalformedImport(_))));
        assert!(matches!(
            Backup::parse(r#"{"centers": "not a list"}"#),
            Err(DirectoryError::MalformedImport(_))
        ));
    }

    #[tokio::test]
    async fn test_write_into_directory_uses_dated_name() {
        let dir = tempfile::tempdir().unwrap();
        let backup = Backup::from_slots(&Slots::default());
        let path = write_backup(dir.path(), &backup).await.expect("Export failed");

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("epz_army_backup_") && name.ends_with(".json"));
        assert_eq!(read_backup(&path).await.unwrap(), backup);
    }
}
