//! MongoDB client handle shared by the repository adapters.
//!
//! The client is created once at startup, verified with a `ping`, and cloned
//! into each repository. Driver clients pool connections internally, so
//! clones are cheap and share the same pool.

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::info;

use crate::domain::ports::{StoreHealth, StoreHealthError};

pub(super) const USERS: &str = "users";
pub(super) const HOUSES: &str = "houses";
pub(super) const BOOKINGS: &str = "bookings";

/// Errors raised while connecting to or preparing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The client could not be built or the server did not answer.
    #[error("failed to connect to document store: {message}")]
    Connect { message: String },

    /// Index creation failed.
    #[error("failed to create index on {collection}: {message}")]
    Index {
        collection: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }
}

/// Connection settings for the document store.
///
/// # Example
///
/// ```
/// use house_hunter::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017").with_database("rentals");
/// assert_eq!(config.database(), "rentals");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
}

impl StoreConfig {
    /// Default database name.
    pub const DEFAULT_DATABASE: &'static str = "houseHunter";

    /// Create a configuration for `uri` using the default database.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: Self::DEFAULT_DATABASE.to_owned(),
        }
    }

    /// Use `database` instead of the default.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Connected database handle.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect, ping the server, and return the handle.
    ///
    /// # Errors
    /// Returns [`StoreError::Connect`] when the URI is invalid or the server
    /// does not answer the ping.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.uri())
            .await
            .map_err(|err| StoreError::connect(err.to_string()))?;
        let database = client.database(config.database());
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::connect(err.to_string()))?;
        info!(database = config.database(), "connected to document store");
        Ok(Self { database })
    }

    /// Create the indexes the adapters rely on.
    ///
    /// The compound unique index on `(renter_email, houseId)` makes a
    /// concurrent duplicate booking fail at insert time.
    ///
    /// # Errors
    /// Returns [`StoreError::Index`] when the server rejects the index, for
    /// example because existing bookings already violate it.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = IndexOptions::builder()
            .unique(true)
            .name("renter_house_unique".to_owned())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "renter_email": 1, "houseId": 1 })
            .options(unique)
            .build();
        self.collection(BOOKINGS)
            .create_index(model)
            .await
            .map_err(|err| StoreError::Index {
                collection: BOOKINGS,
                message: err.to_string(),
            })?;

        let by_owner = IndexModel::builder().keys(doc! { "houseOwner": 1 }).build();
        self.collection(HOUSES)
            .create_index(by_owner)
            .await
            .map_err(|err| StoreError::Index {
                collection: HOUSES,
                message: err.to_string(),
            })?;
        Ok(())
    }

    pub(super) fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), StoreHealthError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(drop)
            .map_err(|err| StoreHealthError::unreachable(err.to_string()))
    }
}
