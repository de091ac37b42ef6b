//! tb-store: file-backed persistence for tablon.
//!
//! [`AnnouncementStore`] keeps every announcement in one CSV file;
//! [`ImageStore`] keeps uploaded images as plain files in one directory.

pub mod announcements;
pub mod assets;

pub use announcements::AnnouncementStore;
pub use assets::ImageStore;
