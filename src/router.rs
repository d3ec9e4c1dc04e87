//! Screen navigation. Back is a fixed parent lookup, not a history stack, so
//! pressing back twice from a nested view can skip levels.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    CenterDetails,
    CenterInfo,
    Persons,
    Admin,
    AdminLogin,
    EditCenter,
    Settings,
}

impl View {
    pub fn parent(self) -> View {
        match self {
            View::CenterDetails => View::Home,
            View::CenterInfo | View::Persons => View::CenterDetails,
            View::EditCenter | View::Settings => View::Admin,
            View::Admin | View::AdminLogin => View::Home,
            _ => View::Home,
        }
    }

    /// Views that show the selected center.
    pub fn needs_selection(self) -> bool {
        matches!(self, View::CenterDetails | View::CenterInfo | View::Persons)
    }

    /// Views reachable only with an admin session.
    pub fn needs_admin(self) -> bool {
        matches!(self, View::Admin | View::EditCenter | View::Settings)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "HOME",
            View::CenterDetails => "CENTER_DETAILS",
            View::CenterInfo => "CENTER_INFO",
            View::Persons => "PERSONS",
            View::Admin => "ADMIN",
            View::AdminLogin => "ADMIN_LOGIN",
            View::EditCenter => "EDIT_CENTER",
            View::Settings => "SETTINGS",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    view: View,
    selected: Option<String>,
}

impl Router {
    /// Starts on ADMIN when an admin session survived the restart.
    pub fn new(admin_session: bool) -> Self {
        Self {
            view: if admin_session { View::Admin } else { View::Home },
            selected: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Moves to `view`, keeping the current selection.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    /// Moves to `view` with `center_id` as the subject.
    pub fn select(&mut self, view: View, center_id: impl Into<String>) {
        self.selected = Some(center_id.into());
        self.view = view;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn back(&mut self) {
        self.view = self.view.parent();
    }

    pub fn home(&mut self) {
        self.view = View::Home;
        self.selected = None;
    }
}
