pub mod microsoft;
