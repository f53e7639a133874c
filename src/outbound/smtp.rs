pub mod office365;
