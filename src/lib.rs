// Ukiyo image manipulation service library

pub mod config;
pub mod constants;
pub mod error;
pub mod fonts;
pub mod handlers;
pub mod imaging;
pub mod logging;
pub mod params;
pub mod server;
