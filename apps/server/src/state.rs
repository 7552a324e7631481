//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::{
        EstablishmentStore, MemEstablishmentStore, MemPublicationStore, PgEstablishmentStore,
        PgPublicationStore, PublicationStore,
    },
    services::{AccountingService, DiscoveryService, EstablishmentService, PublicationService},
    Result,
};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub establishments: EstablishmentService,
    pub accounting: AccountingService,
    pub publications: PublicationService,
    pub discovery: DiscoveryService,
}

impl AppState {
    /// Initialize the application state against Postgres.
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config = Arc::new(config);
        let db_pool = create_db_pool(config.as_ref()).await?;

        if config.database.run_migrations {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .map_err(|e| crate::Error::Internal(format!("Migration failed: {e}")))?;
        }

        let establishment_store: Arc<dyn EstablishmentStore> =
            Arc::new(PgEstablishmentStore::new(db_pool.clone()));
        let publication_store: Arc<dyn PublicationStore> =
            Arc::new(PgPublicationStore::new(db_pool));

        tracing::info!("Application state initialized successfully");

        Ok(Self::from_stores(
            config,
            establishment_store,
            publication_store,
        ))
    }

    /// Wire the services over in-memory stores (useful for tests).
    pub fn in_memory(config: Config) -> Self {
        let establishments = Arc::new(MemEstablishmentStore::new());
        let publications = Arc::new(MemPublicationStore::new(establishments.clone()));
        Self::from_stores(Arc::new(config), establishments, publications)
    }

    pub fn from_stores(
        config: Arc<Config>,
        establishment_store: Arc<dyn EstablishmentStore>,
        publication_store: Arc<dyn PublicationStore>,
    ) -> Self {
        Self {
            config,
            establishments: EstablishmentService::new(establishment_store.clone()),
            accounting: AccountingService::new(establishment_store.clone()),
            publications: PublicationService::new(
                publication_store.clone(),
                establishment_store,
            ),
            discovery: DiscoveryService::new(publication_store),
        }
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query(&format!("SET statement_timeout = '{statement_timeout}s'"))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
