//! Application state: persisted slots, navigation, and the edit draft.
//!
//! Every operation that changes a slot builds the next `Slots` value, writes it
//! to storage, and only then replaces the in-memory copy, so a failed write
//! leaves the previous state intact.

use std::path::Path;

use tracing::{info, warn};

use crate::auth::{Role, Session};
use crate::error::{DirectoryError, Result, ValidationError};
use crate::models::{self, CenterDraft, CenterField, EmergencyContact, PersonField, VotingCenter};
use crate::router::{Router, View};
use crate::search::{self, Stats};
use crate::storage::{Slots, Storage};
use crate::transfer::{self, Backup};

/// What the user currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Password gate shown before any view.
    Locked,
    View(View),
}

pub struct Directory {
    storage: Storage,
    slots: Slots,
    router: Router,
    draft: Option<CenterDraft>,
    renumber: bool,
}

impl Directory {
    pub fn open(storage: Storage, renumber: bool) -> Result<Self> {
        let slots = storage.load()?;
        let router = Router::new(slots.session.admin_logged_in);
        info!(
            centers = slots.centers.len(),
            view = %router.view(),
            renumber,
            "Directory opened"
        );
        Ok(Self {
            storage,
            slots,
            router,
            draft: None,
            renumber,
        })
    }

    pub fn screen(&self) -> Screen {
        if self.slots.session.logged_in {
            Screen::View(self.router.view())
        } else {
            Screen::Locked
        }
    }

    pub fn view(&self) -> View {
        self.router.view()
    }

    pub fn centers(&self) -> &[VotingCenter] {
        &self.slots.centers
    }

    pub fn center(&self, id: &str) -> Option<&VotingCenter> {
        self.slots.centers.iter().find(|c| c.id == id)
    }

    pub fn selected_center(&self) -> Option<&VotingCenter> {
        self.router.selected().and_then(|id| self.center(id))
    }

    pub fn emergency_contact(&self) -> &EmergencyContact {
        &self.slots.emergency_contact
    }

    pub fn session(&self) -> Session {
        self.slots.session
    }

    pub fn draft(&self) -> Option<&CenterDraft> {
        self.draft.as_ref()
    }

    pub fn renumbering(&self) -> bool {
        self.renumber
    }

    pub fn search(&self, query: &str) -> Vec<&VotingCenter> {
        search::search(&self.slots.centers, query)
    }

    pub fn stats(&self) -> Stats {
        search::stats(&self.slots.centers)
    }

    // --- Session ---

    pub fn login(&mut self, input: &str) -> Result<()> {
        if let Err(e) = self.slots.credentials.verify(Role::User, input) {
            warn!("Rejected user login");
            return Err(e);
        }
        let mut next = self.slots.clone();
        next.session.logged_in = true;
        self.commit(next)?;
        info!("User logged in");
        Ok(())
    }

    pub fn admin_login(&mut self, input: &str) -> Result<()> {
        self.require_login()?;
        if let Err(e) = self.slots.credentials.verify(Role::Admin, input) {
            warn!("Rejected admin login");
            return Err(e);
        }
        let mut next = self.slots.clone();
        next.session.admin_logged_in = true;
        self.commit(next)?;
        self.router.navigate(View::Admin);
        info!("Admin logged in");
        Ok(())
    }

    /// Clears both session flags and returns to HOME.
    pub fn logout(&mut self) -> Result<()> {
        let mut next = self.slots.clone();
        next.session = Session::default();
        self.commit(next)?;
        self.draft = None;
        self.router.home();
        info!("Logged out");
        Ok(())
    }

    // --- Navigation ---

    pub fn open_center(&mut self, id: &str) -> Result<()> {
        self.require_login()?;
        if self.center(id).is_none() {
            return Err(DirectoryError::CenterNotFound(id.to_string()));
        }
        self.router.select(View::CenterDetails, id);
        Ok(())
    }

    pub fn open_info(&mut self) -> Result<()> {
        self.open_selected(View::CenterInfo)
    }

    pub fn open_persons(&mut self) -> Result<()> {
        self.open_selected(View::Persons)
    }

    fn open_selected(&mut self, view: View) -> Result<()> {
        self.require_login()?;
        let id = match self.selected_center() {
            Some(center) => center.id.clone(),
            None => {
                let id = self.router.selected().unwrap_or_default().to_string();
                return Err(DirectoryError::CenterNotFound(id));
            }
        };
        self.router.select(view, id);
        Ok(())
    }

    /// ADMIN with an admin session, ADMIN_LOGIN otherwise.
    pub fn open_admin(&mut self) -> Result<()> {
        self.require_login()?;
        if self.slots.session.admin_logged_in {
            self.router.navigate(View::Admin);
        } else {
            self.router.navigate(View::AdminLogin);
        }
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<()> {
        self.require_admin()?;
        self.router.navigate(View::Settings);
        Ok(())
    }

    pub fn back(&mut self) {
        if self.router.view() == View::EditCenter {
            self.draft = None;
        }
        self.router.back();
        self.settle();
    }

    pub fn home(&mut self) {
        self.draft = None;
        self.router.home();
    }

    // --- Center drafts ---

    pub fn start_new_center(&mut self) -> Result<()> {
        self.require_admin()?;
        self.draft = Some(CenterDraft::new_center());
        self.router.navigate(View::EditCenter);
        Ok(())
    }

    pub fn start_edit(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        let center = self
            .center(id)
            .ok_or_else(|| DirectoryError::CenterNotFound(id.to_string()))?;
        self.draft = Some(CenterDraft::from_center(center));
        self.router.navigate(View::EditCenter);
        Ok(())
    }

    fn draft_mut(&mut self) -> Result<&mut CenterDraft> {
        self.draft.as_mut().ok_or(DirectoryError::NoDraft)
    }

    pub fn set_field(&mut self, field: CenterField, value: String) -> Result<()> {
        self.draft_mut()?.set(field, value);
        Ok(())
    }

    /// Adds a blank person row to the draft and returns its id.
    pub fn add_person(&mut self) -> Result<String> {
        Ok(self.draft_mut()?.add_person())
    }

    pub fn update_person(&mut self, person_id: &str, field: PersonField, value: String) -> Result<()> {
        if self.draft_mut()?.update_person(person_id, field, value) {
            Ok(())
        } else {
            Err(DirectoryError::PersonNotFound(person_id.to_string()))
        }
    }

    pub fn remove_person(&mut self, person_id: &str) -> Result<()> {
        if self.draft_mut()?.remove_person(person_id) {
            Ok(())
        } else {
            Err(DirectoryError::PersonNotFound(person_id.to_string()))
        }
    }

    /// Validates and commits the draft. On a validation error the draft and
    /// the EDIT_CENTER view are kept and the center list is unchanged.
    pub fn save_draft(&mut self) -> Result<()> {
        self.require_admin()?;
        let draft = self.draft.as_ref().ok_or(DirectoryError::NoDraft)?;
        if !draft.is_new && self.center(&draft.id).is_none() {
            return Err(DirectoryError::CenterNotFound(draft.id.clone()));
        }
        let center = draft.commit(!self.renumber)?;

        let mut next = self.slots.clone();
        match next.centers.iter_mut().find(|c| c.id == center.id) {
            Some(existing) => *existing = center,
            None => next.centers.push(center),
        }
        if self.renumber {
            models::renumber(&mut next.centers);
        }
        self.commit(next)?;

        if let Some(draft) = self.draft.take() {
            info!(id = %draft.id, new = draft.is_new, "Saved center");
        }
        self.router.navigate(View::Admin);
        Ok(())
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
        self.router.navigate(View::Admin);
    }

    // --- Admin operations ---

    pub fn delete_center(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        let mut next = self.slots.clone();
        let index = next
            .centers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DirectoryError::CenterNotFound(id.to_string()))?;
        next.centers.remove(index);
        if self.renumber {
            models::renumber(&mut next.centers);
        }
        self.commit(next)?;

        if self.router.selected() == Some(id) {
            self.router.clear_selection();
        }
        self.drop_orphaned_draft();
        self.settle();
        info!(id, "Deleted center");
        Ok(())
    }

    pub fn update_emergency_contact(&mut self, name: String, mobile: String) -> Result<()> {
        self.require_admin()?;
        if name.trim().is_empty() || mobile.trim().is_empty() {
            return Err(ValidationError::IncompleteEmergencyContact.into());
        }
        let mut next = self.slots.clone();
        next.emergency_contact = EmergencyContact { name, mobile };
        self.commit(next)?;
        info!("Updated emergency contact");
        Ok(())
    }

    pub fn change_password(&mut self, role: Role, new_password: String) -> Result<()> {
        self.require_admin()?;
        let mut next = self.slots.clone();
        next.credentials.set_password(role, new_password)?;
        self.commit(next)?;
        info!(%role, "Changed password");
        Ok(())
    }

    /// Admin only: the backup carries both passwords in plain text.
    pub fn export_backup(&self) -> Result<Backup> {
        self.require_admin()?;
        Ok(Backup::from_slots(&self.slots))
    }

    pub fn import_backup(&mut self, backup: Backup) -> Result<()> {
        self.require_admin()?;
        let mut next = self.slots.clone();
        backup.apply(&mut next);
        self.commit(next)?;
        self.drop_orphaned_draft();
        self.settle();
        info!(centers = self.slots.centers.len(), "Imported backup");
        Ok(())
    }

    /// Reads and applies a backup file. A parse failure changes nothing.
    pub async fn import_file(&mut self, path: &Path) -> Result<()> {
        self.require_admin()?;
        let backup = transfer::read_backup(path).await?;
        self.import_backup(backup)
    }

    pub async fn export_file(&self, target: &Path) -> Result<std::path::PathBuf> {
        let backup = self.export_backup()?;
        transfer::write_backup(target, &backup).await
    }

    // --- Internals ---

    fn require_login(&self) -> Result<()> {
        if self.slots.session.logged_in {
            Ok(())
        } else {
            Err(DirectoryError::NotLoggedIn)
        }
    }

    fn require_admin(&self) -> Result<()> {
        self.require_login()?;
        if self.slots.session.admin_logged_in {
            Ok(())
        } else {
            Err(DirectoryError::AccessDenied)
        }
    }

    fn commit(&mut self, next: Slots) -> Result<()> {
        self.storage.persist(&next)?;
        self.slots = next;
        Ok(())
    }

    /// Discards an edit draft whose record was removed underneath it.
    fn drop_orphaned_draft(&mut self) {
        let orphaned = self
            .draft
            .as_ref()
            .is_some_and(|d| !d.is_new && self.center(&d.id).is_none());
        if orphaned {
            self.draft = None;
            if self.router.view() == View::EditCenter {
                self.router.navigate(View::Admin);
            }
        }
    }

    /// Leaves views whose subject no longer exists.
    fn settle(&mut self) {
        let view = self.router.view();
        if view.needs_selection() && self.selected_center().is_none() {
            self.router.home();
        } else if view.needs_admin() && !self.slots.session.admin_logged_in {
            self.router.navigate(View::AdminLogin);
        }
    }
}
