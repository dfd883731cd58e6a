pub mod app;
pub mod configs;
pub mod error;
pub mod handler;
pub mod interceptor;
pub mod logger;
