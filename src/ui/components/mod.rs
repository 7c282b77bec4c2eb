pub mod question;
pub mod setup;
pub mod summary;
