pub mod message;
pub mod conversation;
pub mod wire;
pub mod event;
pub mod status;
pub mod config;
pub mod error;


pub use error::ChatError;
pub type Result<T> = std::result::Result<T, ChatError>;
