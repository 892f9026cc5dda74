pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod database;
pub mod dataloader;
pub mod global;
pub mod setup;

#[cfg(test)]
mod tests;
