pub mod config;
pub mod input;
pub mod logging;
pub mod observer;
pub mod session;
