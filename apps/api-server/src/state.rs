//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use petboard_core::ports::TokenService;
use petboard_core::services::{AccountService, AdService};
use petboard_infra::database::connect;
use petboard_infra::{
    Argon2PasswordService, DatabaseConfig, JwtConfig, JwtTokenService, SeaOrmAdRepository,
    SeaOrmUserRepository,
};
use sea_orm::{DbConn, DbErr};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub ads: Arc<AdService>,
    pub accounts: Arc<AccountService>,
    /// Also registered on its own so the `Identity` extractor can reach it.
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Connect to the database, optionally migrate it, and wire the services.
    pub async fn new(
        db_config: &DatabaseConfig,
        run_migrations: bool,
        jwt: JwtConfig,
    ) -> Result<Self, DbErr> {
        let db = connect(db_config).await?;

        if run_migrations {
            Migrator::up(&db, None).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::from_connection(db, jwt))
    }

    /// Wire the services over an already open connection.
    pub fn from_connection(db: DbConn, jwt: JwtConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));

        let ads = AdService::new(Arc::new(SeaOrmAdRepository::new(db.clone())));
        let accounts = AccountService::new(
            Arc::new(SeaOrmUserRepository::new(db)),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
        );

        tracing::info!("Application state initialized");

        Self {
            ads: Arc::new(ads),
            accounts: Arc::new(accounts),
            tokens,
        }
    }
}
