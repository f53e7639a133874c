mod contacts;

pub use contacts::{list_contacts, mark_contact_read, mark_contact_unread, update_contact_notes};
