pub mod db;
pub mod identity;
pub mod notifier;
pub mod smtp;
pub mod telemetry;
