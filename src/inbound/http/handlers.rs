pub mod admin;
pub mod contact;
pub mod health_check;

pub use admin::{list_contacts, mark_contact_read, mark_contact_unread, update_contact_notes};
pub use contact::submit_contact;
pub use health_check::health_check;
