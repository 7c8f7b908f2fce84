pub mod browse;
pub mod config;
pub mod favorites;
pub mod genres;
pub mod history;
pub mod render;
pub mod session;
