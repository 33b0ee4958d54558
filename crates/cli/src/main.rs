//! Storelab CLI - schema management, seeding, and connectivity checks.
//!
//! # Usage
//!
//! ```bash
//! # Create the four tables if they do not exist
//! storelab schema ensure
//!
//! # Drop every table (destructive)
//! storelab schema drop
//!
//! # Truncate every table and restart the id sequences
//! storelab schema wipe
//!
//! # Seed synthetic rows through the repositories
//! storelab seed --users 5 --products 10 --orders 3
//!
//! # Connectivity checks
//! storelab ping db
//! storelab ping rpc
//! storelab ping all
//!
//! # Run the mock server on a fixed port
//! storelab mock-server --port 50051 --latency-ms 25
//! ```
//!
//! # Commands
//!
//! - `schema` - Create, drop, or wipe the e-commerce tables
//! - `seed` - Insert synthetic rows built by the test-data factory
//! - `ping` - Check `PostgreSQL` and `gRPC` connectivity
//! - `mock-server` - Serve the in-memory mock until interrupted

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "storelab")]
#[command(author, version, about = "Storelab CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the database schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Insert synthetic rows through the repositories
    Seed {
        /// Number of users to create
        #[arg(long, default_value_t = 5)]
        users: u32,

        /// Number of products to create
        #[arg(long, default_value_t = 10)]
        products: u32,

        /// Number of orders to create, spread over the seeded users
        #[arg(long, default_value_t = 3)]
        orders: u32,
    },
    /// Check connectivity
    Ping {
        #[command(subcommand)]
        target: PingTarget,
    },
    /// Run the mock gRPC server until interrupted
    MockServer {
        /// Port to listen on
        #[arg(long, default_value_t = 50051)]
        port: u16,

        /// Artificial latency applied to every response, in milliseconds
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,
    },
}

#[derive(Subcommand)]
enum SchemaAction {
    /// Create the tables if they do not exist
    Ensure,
    /// Drop every table (destructive)
    Drop,
    /// Truncate every table and restart the id sequences
    Wipe,
}

#[derive(Subcommand)]
enum PingTarget {
    /// Check the database connection
    Db,
    /// Check the gRPC endpoint
    Rpc,
    /// Check both
    All,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Schema { action } => match action {
            SchemaAction::Ensure => commands::schema::ensure().await?,
            SchemaAction::Drop => commands::schema::drop().await?,
            SchemaAction::Wipe => commands::schema::wipe().await?,
        },
        Commands::Seed {
            users,
            products,
            orders,
        } => {
            commands::seed::run(users, products, orders).await?;
        }
        Commands::Ping { target } => match target {
            PingTarget::Db => commands::ping::db().await?,
            PingTarget::Rpc => commands::ping::rpc().await?,
            PingTarget::All => {
                commands::ping::db().await?;
                commands::ping::rpc().await?;
            }
        },
        Commands::MockServer { port, latency_ms } => {
            commands::mock_server::run(port, latency_ms).await?;
        }
    }
    Ok(())
}
