pub mod contact;
pub mod fields;
pub mod name;
