pub mod aggregate;
pub mod cli;
pub mod config;
pub mod explorer;
pub mod models;
pub mod price;
pub mod report;
pub mod session;
