//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod economy_server;
pub mod economy_user;
pub mod log_config;
pub mod logging_server;
pub mod prefix;

// Re-export specific types to avoid conflicts
pub use economy_server::{
    Column as EconomyServerColumn, Entity as EconomyServer, Model as EconomyServerModel,
};
pub use economy_user::{
    Column as EconomyUserColumn, Entity as EconomyUser, Model as EconomyUserModel,
};
pub use log_config::{Column as LogConfigColumn, Entity as LogConfig, Model as LogConfigModel};
pub use logging_server::{
    Column as LoggingServerColumn, Entity as LoggingServer, Model as LoggingServerModel,
};
pub use prefix::{Column as PrefixColumn, Entity as Prefix, Model as PrefixModel};
