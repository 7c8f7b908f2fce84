pub mod api;
pub mod client;
pub mod push;

pub use client::RestStore;
