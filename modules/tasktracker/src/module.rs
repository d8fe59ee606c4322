use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::TaskTrackerConfig;
use crate::contract::client::TaskTrackerApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::TaskTrackerLocalClient;
use crate::infra::seed;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmRepository;

/// The tasktracker module: owns the domain service and exposes it over REST
/// and as an in-process client.
#[derive(Clone)]
pub struct TaskTracker {
    service: Arc<Service>,
}

/// Create or upgrade the module's tables.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("Running tasktracker database migrations");
    Migrator::up(db, None)
        .await
        .context("tasktracker migrations failed")?;
    info!("Tasktracker database migrations completed successfully");
    Ok(())
}

impl TaskTracker {
    /// Migrates the store, seeds it when configured and empty, and wires the service.
    pub async fn init(db: DatabaseConnection, cfg: TaskTrackerConfig) -> anyhow::Result<Self> {
        info!("Initializing tasktracker module");
        debug!(
            "Loaded tasktracker config: seed_demo_data={}",
            cfg.seed_demo_data
        );

        migrate(&db).await?;

        // Wire repository (infra) to domain service (port)
        let repo = Arc::new(SeaOrmRepository::new(db));
        if cfg.seed_demo_data {
            let seeded = seed::seed_demo_data(repo.as_ref(), Utc::now())
                .await
                .context("failed to seed demo data")?;
            if !seeded {
                debug!("Store already has users, skipping demo data");
            }
        }

        let service = Service::new(repo, ServiceConfig::from(&cfg.limits));
        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client for other modules.
    pub fn client(&self) -> Arc<dyn TaskTrackerApi> {
        Arc::new(TaskTrackerLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering tasktracker REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
