pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod web;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use db::Store;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => run_server(config).await,
        Commands::Initdb { drop } => cmd_initdb(&config, drop).await,
        Commands::Forge => cmd_forge(&config).await,
        Commands::Admin => cmd_admin(&config).await,
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Cinelog v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let state = web::AppState::new(config.clone()).await?;
    let app = web::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Web server running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn cmd_initdb(config: &Config, drop: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if drop {
        store.reset_schema().await?;
        println!("Dropped and recreated all tables.");
    }

    println!("Initialized database.");
    Ok(())
}

const DEMO_USER_NAME: &str = "Jason Cao";

const DEMO_MOVIES: [(&str, &str); 10] = [
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
    ("The Pork of Music", "2012"),
];

/// Seed the demo catalog. Repeat runs duplicate the rows.
async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    store.create_named_user(DEMO_USER_NAME).await?;
    for (title, year) in DEMO_MOVIES {
        store.add_movie(title, year).await?;
    }

    println!("Done.");
    Ok(())
}

async fn cmd_admin(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let username = prompt("Username")?;
    if username.is_empty() {
        anyhow::bail!("Username cannot be empty");
    }

    let password = prompt("Password")?;
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    let confirmation = prompt("Confirm password")?;
    if password != confirmation {
        anyhow::bail!("Passwords do not match");
    }

    let updated = store
        .upsert_admin(&username, &password, &config.security)
        .await?;

    if updated {
        println!("Updating user...");
    } else {
        println!("Creating user...");
    }
    println!("Done.");

    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    use std::io::Write;

    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
