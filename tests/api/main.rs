mod admin;
mod contact;
mod health_check;
mod helpers;
