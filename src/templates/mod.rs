//! Application shell templates.
//!
//! The root and list routes serve the same single-page-app shell; the
//! frontend router takes over from there. The shell is rendered once at
//! startup and served unchanged.

pub mod shell;

pub use shell::{AppShell, TemplateError};
