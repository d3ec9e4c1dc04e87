//! Voting center directory
//!
//! Password-gated directory of voting centers, their personnel, and a single
//! emergency contact, kept in a local sled store:
//! - Storage: six named slots (centers, emergency contact, two passwords, two session flags)
//! - Directory: application state, view navigation, and center drafts
//! - Shell: terminal front end rendering one screen per view
//! - Transfer: JSON backup export/import

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod links;
pub mod logging;
pub mod models;
pub mod router;
pub mod search;
pub mod seed; // Defaults for empty or unreadable slots
pub mod shell;
pub mod storage;
// Backup files: same JSON shape for export and import
pub mod transfer;
