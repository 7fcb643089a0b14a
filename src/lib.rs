pub mod cli;
pub mod contact;
pub mod error;
pub mod github;
pub mod health;
pub mod loader;
pub mod models;
pub mod page;
pub mod refresh;
pub mod render;
pub mod site;
pub mod types;
