pub mod credentials;
pub mod message;
pub mod token;
