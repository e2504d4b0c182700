pub mod notify;
pub mod show_config;
