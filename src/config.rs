// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    clients::{EnvelopeClient, StorageClient},
    db::{CustomerRepository, JobRepository, ProfileRepository},
    services::{
        auth::AuthService, customer_service::CustomerService, job_service::JobService,
        session_service::SessionService,
    },
};

// Settings read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub storage_url: String,
    pub storage_service_key: String,
    pub storage_bucket: String,
    pub internal_api_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let db_max_connections = optional("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            storage_url: required("STORAGE_URL")?,
            storage_service_key: required("STORAGE_SERVICE_KEY")?,
            storage_bucket: optional("STORAGE_BUCKET", "media"),
            internal_api_url: required("INTERNAL_API_URL")?,
            bind_addr: optional("BIND_ADDR", "0.0.0.0:3000"),
            db_max_connections,
            run_migrations: parse_flag(&optional("RUN_MIGRATIONS", "false")),
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub session_service: SessionService,
    pub customer_service: CustomerService,
    pub job_service: JobService,
    pub envelope_client: EnvelopeClient,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("could not connect to the database")?;

        tracing::info!("✅ Database connection established");

        // --- Dependency graph ---
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("could not build the HTTP client")?;

        let storage = StorageClient::new(
            http.clone(),
            &config.storage_url,
            &config.storage_bucket,
            &config.storage_service_key,
        );
        let envelope_client = EnvelopeClient::new(http, &config.internal_api_url);

        let profile_repo = ProfileRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let job_repo = JobRepository::new(db_pool.clone());

        Ok(Self {
            auth_service: AuthService::new(config.jwt_secret.clone()),
            session_service: SessionService::new(Arc::new(profile_repo)),
            customer_service: CustomerService::new(customer_repo),
            job_service: JobService::new(job_repo, storage),
            envelope_client,
            db_pool,
        })
    }
}
