pub mod endpoint;

pub use endpoint::HttpChatEndpoint;
