//! Context of the server. Contains the configuration and the DAOs.
use std::sync::Arc;

use color_eyre::Result;
use mongodb::{Client, Database};

use crate::server::{Config, TuitDao, UserDao};

/// Context being shared between handlers. This will be cloned every time a
/// handler is called, so everything in it is either an `Arc` or a cheap
/// collection handle. Holds no request-specific state.
#[must_use]
#[derive(Debug, Clone)]
pub struct Context {
    config: Arc<Config>,
    tuits: TuitDao,
    users: UserDao,
}

impl Context {
    /// Connect to the database named by the config.
    ///
    /// # Errors
    /// Fails on an invalid database url.
    pub async fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let db = client.database(&config.mongo_db);

        Ok(Self::new_with_db(&db, config))
    }

    /// Construct self with a preconnected database.
    pub fn new_with_db(db: &Database, config: Arc<Config>) -> Self {
        let tuits = TuitDao::new(db.collection(&config.tuits_collection));
        let users = UserDao::new(db.collection(&config.users_collection));

        Self {
            config,
            tuits,
            users,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn tuits(&self) -> &TuitDao {
        &self.tuits
    }

    #[must_use]
    pub const fn users(&self) -> &UserDao {
        &self.users
    }
}
