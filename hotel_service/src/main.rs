use std::sync::Arc;

use anyhow::Context;
use hotel_auth::token::JwtVerifier;
use hotel_service::domain::validators::Validators;
use hotel_service::outbound::PgOccupancyStore;
use sqlx::postgres::PgPoolOptions;

use crate::api::context::ApiContext;
use crate::config::{Config, Environment};

mod api;
mod config;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Parse our configuration from the environment.
    let config = Config::from_env().context("expected to be able to generate config")?;

    tracing::info!("initialized config");

    let (min_connections, max_connections): (u32, u32) = match config.environment {
        Environment::Production => (5, 30),
        Environment::Develop => (3, 20),
        Environment::Local => (3, 10),
    };

    let db = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect(&config.database_url)
        .await
        .context("could not connect to hoteldb")?;

    tracing::info!(
        min_connections,
        max_connections,
        "initialized hoteldb connection"
    );

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("could not run migrations")?;

    tracing::info!("migrations are up to date");

    let verifier = JwtVerifier::new(&config.jwt_secret, &config.jwt_audience, &config.jwt_issuer);
    let validators = Arc::new(Validators::new());
    let store = PgOccupancyStore::new(db.clone());

    api::setup_and_serve(ApiContext {
        db,
        config: Arc::new(config),
        verifier,
        validators,
        store,
    })
    .await?;
    Ok(())
}
