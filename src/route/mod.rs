pub mod auth;
pub mod joke;
pub mod jokes;
