//! UI layer for desktop GUI: app shell, user table, and detail overlay.

pub mod app;
pub mod user_modal;
pub mod user_table;

#[cfg(test)]
mod headless;

pub use app::UserDirectoryApp;
