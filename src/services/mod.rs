mod ssh_config;
mod teams_connector;

pub use ssh_config::{default_ssh_config_path, read_ssh_config};
pub use teams_connector::TeamsConnector;
