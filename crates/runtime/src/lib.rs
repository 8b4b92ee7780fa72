use anyhow::{bail, Result};
use spendlog_advisor::{AdviceClient, AdvisorError};
use spendlog_auth::Authenticator;
use spendlog_config::AppConfig;
use spendlog_database::initialize_database;
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
    pub advisor: Option<AdviceClient>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        if config.auth.secret.trim().is_empty() {
            bail!("auth.secret is not configured; set SPENDLOG__AUTH__SECRET");
        }

        let db_pool = initialize_database(&config.database).await?;

        let authenticator = Authenticator::new(db_pool.clone(), config.auth.clone());

        // Advice client is optional (no API key disables the feature)
        let advisor = match AdviceClient::from_config(&config.advisor) {
            Ok(client) => {
                info!(model = client.model(), "advice client ready");
                Some(client)
            }
            Err(AdvisorError::ApiKeyMissing) => {
                info!("no advisor API key configured, spending advice disabled");
                None
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self {
            db_pool,
            authenticator,
            advisor,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
