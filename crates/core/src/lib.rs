pub mod config;
pub mod context;
pub mod error;
pub mod invocation;
pub mod lifecycle;
pub mod proxy;
pub mod sanitize;
pub mod types;
