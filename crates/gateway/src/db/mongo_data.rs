use async_trait::async_trait;
use log::info;
use mongodb::{bson::doc, options::ClientOptions, Client};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to reach mongo: {0}")]
    Driver(#[from] mongodb::error::Error),
}

/// Database connectivity surface. Only a ping is needed today; the trait
/// keeps the handle mockable in route tests.
#[async_trait]
pub trait MongoData: Send + Sync {
    async fn ping(&self) -> Result<(), Error>;
}

/// Process-wide Mongo handle, connected once at startup. The driver pools
/// connections and reconnects on drop internally.
pub struct MongoAccess {
    client: Client,
}

impl MongoAccess {
    pub async fn connect(uri: &str) -> Result<Self, Error> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        info!("mongo client initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl MongoData for MongoAccess {
    async fn ping(&self) -> Result<(), Error> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
