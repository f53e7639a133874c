pub mod contact_alert;
