pub mod auth;
pub mod crypto;
pub mod init;
pub mod items;
pub mod misc;
