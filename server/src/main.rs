use anyhow::Context;
use clap::{Parser, Subcommand};
use spendlog_api::{build_router, AppState};
use spendlog_auth::hash_password;
use spendlog_config::load as load_config;
use spendlog_database::{
    AccountRepository, CategoryRepository, ExpenseRepository, NewAccount, NewCategory, NewExpense,
    NewUser, UserRepository,
};
use spendlog_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo-password";

#[derive(Parser)]
#[command(name = "spendlog-server")]
#[command(about = "Spendlog expense tracking backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Seed the database with a demo user and sample expenses
    SeedData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::SeedData => seed_data().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Spendlog backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = AppState::new(
        services.db_pool.clone(),
        services.authenticator.clone(),
        services.advisor.clone(),
    );
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(spendlog_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("seeding database with demo data");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let password_hash = hash_password(DEMO_PASSWORD)
        .map_err(|error| anyhow::anyhow!("failed to hash demo password: {error}"))?;

    let users = UserRepository::new(services.db_pool.clone());
    let user = users
        .insert(NewUser {
            email: DEMO_EMAIL.into(),
            full_name: "Demo User".into(),
            password_hash,
        })
        .await
        .context("failed to insert demo user (already seeded?)")?;

    let accounts = AccountRepository::new(services.db_pool.clone());
    let cash = accounts
        .insert(NewAccount {
            user_id: user.id,
            currency_id: 1,
            name: "Cash".into(),
            initial_amount: 5_000,
        })
        .await
        .context("failed to insert demo account Cash")?;
    let checking = accounts
        .insert(NewAccount {
            user_id: user.id,
            currency_id: 1,
            name: "Checking".into(),
            initial_amount: 125_000,
        })
        .await
        .context("failed to insert demo account Checking")?;

    let categories = CategoryRepository::new(services.db_pool.clone());
    let groceries = categories
        .insert(NewCategory {
            user_id: user.id,
            name: "Groceries".into(),
        })
        .await
        .context("failed to insert demo category Groceries")?;
    let transport = categories
        .insert(NewCategory {
            user_id: user.id,
            name: "Transport".into(),
        })
        .await
        .context("failed to insert demo category Transport")?;

    let expenses = ExpenseRepository::new(services.db_pool.clone());
    let samples = [
        (cash.id, Some(groceries.id), "Farmers market", "Saturday run", 2_340),
        (cash.id, Some(transport.id), "Bus ticket", "", 275),
        (checking.id, Some(groceries.id), "Weekly shop", "Supermarket", 8_712),
        (checking.id, None, "Streaming", "Monthly plan", 1_199),
    ];
    for (account_id, category_id, name, description, amount) in samples {
        expenses
            .insert(NewExpense {
                user_id: user.id,
                account_id,
                category_id,
                name: name.into(),
                description: description.into(),
                amount,
            })
            .await
            .with_context(|| format!("failed to insert demo expense {name}"))?;
    }

    println!("Seeded demo data:");
    println!("- user {DEMO_EMAIL} (password: {DEMO_PASSWORD})");
    println!("- 2 accounts, 2 categories, {} expenses", samples.len());
    println!("Log in via POST /api/auth/login to explore the API");

    Ok(())
}
