pub mod ports;
pub mod event_bus;
pub mod client;
pub mod tasks;
pub mod config;
