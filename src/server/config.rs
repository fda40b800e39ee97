//! Server config.
use std::net::SocketAddr;

use color_eyre::Result;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Server config.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub bind: SocketAddr,
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// MongoDB database name.
    pub mongo_db: String,
    /// Collection holding tuit documents.
    pub tuits_collection: String,
    /// Collection holding user documents.
    pub users_collection: String,
}

impl Config {
    /// Load config from environment variables.
    ///
    /// # Errors
    /// Returns error if part of the config is invalid.
    pub fn from_env() -> Result<Self> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("TUITER_"))
            .extract()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".parse().unwrap(),
            mongo_uri: String::from("mongodb://localhost:27017"),
            mongo_db: String::from("tuiter"),
            tuits_collection: String::from("tuits"),
            users_collection: String::from("users"),
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use crate::server::Config;

    #[test]
    fn must_default() {
        Jail::expect_with(|_| {
            assert_eq!(Config::from_env().unwrap(), Config::default());
            Ok(())
        });
    }

    #[test]
    fn must_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("TUITER_BIND", "0.0.0.0:8080");
            jail.set_env("TUITER_MONGO_URI", "mongodb://tuiter-db:27017");
            jail.set_env("TUITER_MONGO_DB", "db");
            jail.set_env("TUITER_TUITS_COLLECTION", "t");
            jail.set_env("TUITER_USERS_COLLECTION", "u");
            assert_eq!(
                Config::from_env().unwrap(),
                Config {
                    bind: "0.0.0.0:8080".parse().unwrap(),
                    mongo_uri: String::from("mongodb://tuiter-db:27017"),
                    mongo_db: String::from("db"),
                    tuits_collection: String::from("t"),
                    users_collection: String::from("u"),
                }
            );
            Ok(())
        });
    }
}
