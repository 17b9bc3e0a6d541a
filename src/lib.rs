pub mod config;
pub mod dispatcher;
pub mod download;
pub mod errors;
pub mod handlers;
pub mod limiter;
pub mod localization;
pub mod messenger;
pub mod payload;
pub mod schema;
pub mod session;
pub mod telegram;
pub mod temp_file;
pub mod utils;
pub mod youtube;
