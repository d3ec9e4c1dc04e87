//! Line-oriented terminal front end. Each input line is one user action; the
//! current screen is rendered after every action.

use std::fmt::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::auth::Role;
use crate::directory::{Directory, Screen};
use crate::links;
use crate::models::{CenterField, PersonField};
use crate::router::View;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Unlock the directory with the user password
    Login { password: String },
    /// Enter the admin panel with the admin password
    AdminLogin { password: String },
    Logout,
    /// Open a center by id
    Open { id: String },
    /// Show the selected center's information
    Info,
    /// Show the selected center's personnel
    Persons,
    Back,
    Home,
    /// Open the admin panel (asks for the admin password if needed)
    Admin,
    Settings,
    /// Filter the home list; no query clears the filter
    Search { query: Vec<String> },
    /// Start a new center draft
    Add,
    /// Start editing a center
    Edit { id: String },
    /// Set a field of the current draft
    Set { field: CenterField, value: String },
    AddPerson,
    /// Set a field of a person in the current draft
    Person {
        id: String,
        field: PersonField,
        value: String,
    },
    RemovePerson { id: String },
    Save,
    Cancel,
    Delete { id: String },
    /// Show the emergency contact
    Sos,
    /// Replace the emergency contact
    Emergency { name: String, mobile: String },
    /// Change a password
    Password { role: Role, new_password: String },
    /// Write a backup file (default: dated file in the export directory)
    Export { path: Option<PathBuf> },
    /// Load a backup file
    Import { path: PathBuf },
    Stats,
    #[command(alias = "exit")]
    Quit,
}

/// Splits a line on whitespace; double quotes group words and `""` is an
/// empty argument.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err("Unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let tokens = tokenize(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(tokens)
        .map(|line| Some(line.command))
        .map_err(|e| e.to_string())
}

#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(Option<String>),
    Quit,
}

pub struct Shell {
    directory: Directory,
    search_query: String,
    maps_api_key: Option<String>,
    export_dir: PathBuf,
}

impl Shell {
    pub fn new(directory: Directory, maps_api_key: Option<String>, export_dir: PathBuf) -> Self {
        Self {
            directory,
            search_query: String::new(),
            maps_api_key,
            export_dir,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub async fn handle_line(&mut self, line: &str) -> Step {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Step::Continue(None),
            Err(message) => Step::Continue(Some(message)),
        }
    }

    pub async fn execute(&mut self, command: ShellCommand) -> Step {
        if command == ShellCommand::Quit {
            return Step::Quit;
        }
        let locked = self.directory.screen() == Screen::Locked;
        if locked && !matches!(command, ShellCommand::Login { .. }) {
            return Step::Continue(Some("Login required".to_string()));
        }
        match self.run(command).await {
            Ok(message) => Step::Continue(message),
            Err(e) => Step::Continue(Some(e.to_string())),
        }
    }

    async fn run(&mut self, command: ShellCommand) -> crate::error::Result<Option<String>> {
        let dir = &mut self.directory;
        match command {
            ShellCommand::Login { password } => dir.login(&password)?,
            ShellCommand::AdminLogin { password } => dir.admin_login(&password)?,
            ShellCommand::Logout => {
                self.search_query.clear();
                dir.logout()?
            }
            ShellCommand::Open { id } => dir.open_center(&id)?,
            ShellCommand::Info => dir.open_info()?,
            ShellCommand::Persons => dir.open_persons()?,
            ShellCommand::Back => dir.back(),
            ShellCommand::Home => dir.home(),
            ShellCommand::Admin => dir.open_admin()?,
            ShellCommand::Settings => dir.open_settings()?,
            ShellCommand::Search { query } => {
                self.search_query = query.join(" ");
                dir.home();
            }
            ShellCommand::Add => dir.start_new_center()?,
            ShellCommand::Edit { id } => dir.start_edit(&id)?,
            ShellCommand::Set { field, value } => dir.set_field(field, value)?,
            ShellCommand::AddPerson => {
                let id = dir.add_person()?;
                return Ok(Some(format!("Added person {id}")));
            }
            ShellCommand::Person { id, field, value } => dir.update_person(&id, field, value)?,
            ShellCommand::RemovePerson { id } => dir.remove_person(&id)?,
            ShellCommand::Save => {
                dir.save_draft()?;
                return Ok(Some("Saved".to_string()));
            }
            ShellCommand::Cancel => dir.cancel_draft(),
            ShellCommand::Delete { id } => {
                dir.delete_center(&id)?;
                return Ok(Some(format!("Deleted center {id}")));
            }
            ShellCommand::Sos => {
                let contact = dir.emergency_contact();
                return Ok(Some(format!(
                    "EMERGENCY: {} {} ({})",
                    contact.name,
                    contact.mobile,
                    links::tel_uri(&contact.mobile)
                )));
            }
            ShellCommand::Emergency { name, mobile } => {
                dir.update_emergency_contact(name, mobile)?;
                return Ok(Some("Emergency contact saved".to_string()));
            }
            ShellCommand::Password { role, new_password } => {
                dir.change_password(role, new_password)?;
                return Ok(Some(format!("{role} password changed")));
            }
            ShellCommand::Export { path } => {
                let target = path.unwrap_or_else(|| self.export_dir.clone());
                let written = dir.export_file(&target).await?;
                return Ok(Some(format!("Exported to {}", written.display())));
            }
            ShellCommand::Import { path } => {
                dir.import_file(&path).await?;
                return Ok(Some("Import complete".to_string()));
            }
            ShellCommand::Stats => {
                let stats = dir.stats();
                return Ok(Some(format!(
                    "{} centers, {} personnel",
                    stats.total_centers, stats.total_personnel
                )));
            }
            ShellCommand::Quit => {}
        }
        Ok(None)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) -> fmt::Result {
        let dir = &self.directory;
        let view = match dir.screen() {
            Screen::Locked => {
                writeln!(out, "== LOCKED ==")?;
                return writeln!(out, "Enter the access password: login <password>");
            }
            Screen::View(view) => view,
        };
        writeln!(out, "== {view} ==")?;
        match view {
            View::Home => {
                let found = dir.search(&self.search_query);
                if !self.search_query.is_empty() {
                    writeln!(out, "Search: {}", self.search_query)?;
                }
                writeln!(out, "Centers ({})", found.len())?;
                for center in found {
                    writeln!(out, "  [{}] {}  (open {})", center.center_number, center.name, center.id)?;
                }
            }
            View::CenterDetails => {
                if let Some(center) = dir.selected_center() {
                    writeln!(out, "Center No. {}: {}", center.center_number, center.name)?;
                    writeln!(out, "  info     center information")?;
                    writeln!(out, "  persons  responsible personnel ({})", center.important_persons.len())?;
                }
            }
            View::CenterInfo => {
                if let Some(center) = dir.selected_center() {
                    writeln!(out, "Center No. {}: {}", center.center_number, center.name)?;
                    writeln!(out, "  Booths: {}", center.booth_count)?;
                    writeln!(out, "  Voters: {}", center.voter_count)?;
                    writeln!(out, "  Room:   {}", center.room_location)?;
                    writeln!(out, "  Link:   {}", center.location_link)?;
                    match links::map_embed_url(&center.location_link, self.maps_api_key.as_deref()) {
                        Some(url) => writeln!(out, "  Map:    {url}")?,
                        None => writeln!(out, "  Map:    no location set")?,
                    }
                }
            }
            View::Persons => {
                if let Some(center) = dir.selected_center() {
                    for p in &center.important_persons {
                        writeln!(out, "  {} - {}", p.name, p.designation)?;
                        writeln!(out, "    {}  {}", links::tel_uri(&p.mobile), links::whatsapp_uri(&p.mobile))?;
                    }
                }
            }
            View::Admin => {
                let stats = dir.stats();
                writeln!(out, "{} centers, {} personnel", stats.total_centers, stats.total_personnel)?;
                for center in dir.centers() {
                    writeln!(out, "  [{}] {}  (edit/delete {})", center.center_number, center.name, center.id)?;
                }
                writeln!(out, "add | edit <id> | delete <id> | settings | logout")?;
            }
            View::AdminLogin => {
                writeln!(out, "Enter the admin password: admin-login <password>")?;
            }
            View::EditCenter => {
                if let Some(draft) = dir.draft() {
                    let title = if draft.is_new { "New center" } else { "Edit center" };
                    writeln!(out, "{title} ({})", draft.id)?;
                    if dir.renumbering() {
                        writeln!(out, "  number:  {} (assigned on save)", draft.center_number)?;
                    } else {
                        writeln!(out, "  number:  {}", draft.center_number)?;
                    }
                    writeln!(out, "  name:    {}", draft.name)?;
                    writeln!(out, "  booths:  {}", draft.booth_count)?;
                    writeln!(out, "  voters:  {}", draft.voter_count)?;
                    writeln!(out, "  room:    {}", draft.room_location)?;
                    writeln!(out, "  link:    {}", draft.location_link)?;
                    writeln!(out, "  persons:")?;
                    for p in &draft.persons {
                        writeln!(out, "    {} | {} | {} | {}", p.id, p.name, p.designation, p.mobile)?;
                    }
                    writeln!(out, "set <field> <value> | add-person | person <id> <field> <value> | save | cancel")?;
                }
            }
            View::Settings => {
                let contact = dir.emergency_contact();
                writeln!(out, "Emergency contact: {} {}", contact.name, contact.mobile)?;
                let mode = if dir.renumbering() { "sequential" } else { "manual" };
                writeln!(out, "Center numbering: {mode}")?;
                writeln!(out, "emergency <name> <mobile> | password <user|admin> <new> | export [path] | import <path>")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn shell() -> Shell {
        let directory = Directory::open(Storage::temporary().unwrap(), true).unwrap();
        Shell::new(directory, None, std::env::temp_dir())
    }

    #[test]
    fn test_tokenize_quotes_and_empty_arguments() {
        assert_eq!(
            tokenize(r#"set name "Site  B" "#).unwrap(),
            vec!["set".to_string(), "name".to_string(), "Site  B".to_string()]
        );
        assert_eq!(tokenize(r#"login """#).unwrap(), vec!["login".to_string(), String::new()]);
        assert!(tokenize("   ").unwrap().is_empty());
        assert!(tokenize(r#"set name "open"#).is_err());
    }

    #[test]
    fn test_parse_line_commands() {
        assert_eq!(
            parse_line("person p1 mobile 0171").unwrap(),
            Some(ShellCommand::Person {
                id: "p1".to_string(),
                field: PersonField::Mobile,
                value: "0171".to_string()
            })
        );
        assert_eq!(
            parse_line("password admin s3cret").unwrap(),
            Some(ShellCommand::Password {
                role: Role::Admin,
                new_password: "s3cret".to_string()
            })
        );
        assert_eq!(parse_line("exit").unwrap(), Some(ShellCommand::Quit));
        assert_eq!(parse_line("").unwrap(), None);
        assert!(parse_line("set colour red").is_err());
        assert!(parse_line("fly").is_err());
    }

    #[tokio::test]
    async fn test_locked_shell_only_accepts_login() {
        let mut shell = shell();
        assert_eq!(
            shell.handle_line("open 1").await,
            Step::Continue(Some("Login required".to_string()))
        );
        assert!(shell.render().contains("LOCKED"));
        assert_eq!(
            shell.handle_line("sos").await,
            Step::Continue(Some("Login required".to_string()))
        );

        let step = shell.handle_line(r#"login """#).await;
        assert_eq!(step, Step::Continue(Some("Wrong user password".to_string())));
        assert_eq!(shell.handle_line("login EPZArmy").await, Step::Continue(None));
        assert!(shell.render().contains("== HOME =="));
        assert_eq!(
            shell.handle_line("sos").await,
            Step::Continue(Some("EMERGENCY: ক্যাম্প কমান্ডার 01712345678 (tel:01712345678)".to_string()))
        );
        assert_eq!(shell.handle_line("quit").await, Step::Quit);
    }

    #[tokio::test]
    async fn test_search_filters_home_list() {
        let mut shell = shell();
        shell.handle_line("login EPZArmy").await;
        shell.handle_line("search 01512345681").await;
        let screen = shell.render();
        assert!(screen.contains("Centers (1)"));
        assert!(screen.contains("(open 2)"));
        shell.handle_line("search").await;
        assert!(shell.render().contains("Centers (3)"));
    }

    #[tokio::test]
    async fn test_admin_flow_adds_center() {
        let mut shell = shell();
        shell.handle_line("login EPZArmy").await;
        shell.handle_line("admin").await;
        assert!(shell.render().contains("ADMIN_LOGIN"));
        shell.handle_line("admin-login admin123").await;
        shell.handle_line("add").await;
        assert!(shell.render().contains("New center"));

        let step = shell.handle_line("save").await;
        assert_eq!(step, Step::Continue(Some("Center name is required".to_string())));
        assert!(shell.render().contains("EDIT_CENTER"));

        shell.handle_line(r#"set name "Site D""#).await;
        assert_eq!(shell.handle_line("save").await, Step::Continue(Some("Saved".to_string())));
        let screen = shell.render();
        assert!(screen.contains("== ADMIN =="));
        assert!(screen.contains("[04] Site D"));
    }

    #[tokio::test]
    async fn test_delete_from_edit_screen_does_not_resurrect_center() {
        let mut shell = shell();
        shell.handle_line("login EPZArmy").await;
        shell.handle_line("admin-login admin123").await;
        shell.handle_line("edit 2").await;
        shell.handle_line("delete 2").await;
        assert_eq!(
            shell.handle_line("save").await,
            Step::Continue(Some("No center is being edited".to_string()))
        );
        let screen = shell.render();
        assert!(screen.contains("== ADMIN =="));
        assert!(!screen.contains("(edit/delete 2)"));
    }

    #[tokio::test]
    async fn test_export_needs_admin_login() {
        let mut shell = shell();
        shell.handle_line("login EPZArmy").await;
        assert_eq!(
            shell.handle_line("export").await,
            Step::Continue(Some("Admin login required".to_string()))
        );
    }

    #[tokio::test]
    async fn test_persons_view_shows_contact_links() {
        let mut shell = shell();
        shell.handle_line("login EPZArmy").await;
        shell.handle_line("open 3").await;
        shell.handle_line("persons").await;
        let screen = shell.render();
        assert!(screen.contains("tel:01312345682"));
        assert!(screen.contains("https://wa.me/01312345682"));

        shell.handle_line("back").await;
        shell.handle_line("info").await;
        assert!(shell.render().contains("no location set"));
    }
}
