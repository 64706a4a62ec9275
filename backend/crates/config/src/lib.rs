pub mod env;
pub mod teams;
pub mod tracing_init;

pub use env::AppConfig;
pub use teams::{default_team, resolve_teams, TeamDefinition, TeamEntry, TeamsConfig, DEFAULT_TEAM};
pub use tracing_init::init_tracing;
