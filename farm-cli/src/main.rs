//! Farmbase Command Line Interface
//!
//! Usage:
//!   farm init                - Initialize database schema
//!   farm start               - Start API server
//!   farm status              - Show server status
//!   farm farmer register     - Register a farmer
//!   farm farmer get <id>     - Show a farmer
//!   farm farmer list         - List farmers
//!   farm credit estimate     - Estimate carbon credits
//!   farm credit enroll       - Enroll a farmer
//!   farm insight generate    - Generate a synthetic insight

use clap::{Parser, Subcommand};
use std::sync::Arc;

use farm_api::{ApiConfig, run_server};
use farm_connect::HttpConnectorFactory;
use farm_db::{Datastore, FarmDatabase};

mod commands;

#[derive(Parser)]
#[command(name = "farm")]
#[command(about = "Farmbase administrative CLI")]
#[command(version)]
struct Cli {
    /// Database URL
    #[arg(long, default_value = "mem://")]
    db_url: String,

    /// Tenant ID
    #[arg(long, default_value = "default")]
    tenant: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize database schema
    Init,

    /// Start the API server
    Start {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Shared secret for destructive admin endpoints
        #[arg(long, env = "FARM_ADMIN_TOKEN")]
        admin_token: Option<String>,
    },

    /// Show server status
    Status {
        /// API server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        api_url: String,
    },

    /// Farmer administration
    Farmer {
        #[command(subcommand)]
        action: FarmerCommands,
    },

    /// Carbon credit operations
    Credit {
        #[command(subcommand)]
        action: CreditCommands,
    },

    /// Satellite insight operations
    Insight {
        #[command(subcommand)]
        action: InsightCommands,
    },
}

#[derive(Subcommand)]
enum FarmerCommands {
    /// Register a new farmer
    Register {
        /// Phone number (E.164)
        #[arg(short, long)]
        phone: String,
        /// Farmer name
        #[arg(short, long)]
        name: String,
        /// Free-text location
        #[arg(short, long, default_value = "")]
        location: String,
        /// Language code
        #[arg(long, default_value = "en")]
        language: String,
        /// Comma-separated crop list
        #[arg(short, long)]
        crops: Option<String>,
    },
    /// Get farmer info
    Get {
        /// Farmer ID
        farmer_id: String,
    },
    /// List farmers
    List {
        /// Filter by crop
        #[arg(long)]
        crop: Option<String>,
        /// Limit results
        #[arg(short, long, default_value = "100")]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum CreditCommands {
    /// Estimate credits without persisting
    Estimate {
        /// Comma-separated practices
        #[arg(long)]
        practices: String,
        /// Acreage
        #[arg(short, long)]
        acreage: String,
        /// Crop name
        #[arg(short, long)]
        crop: String,
    },
    /// Enroll a farmer in the carbon program
    Enroll {
        /// Farmer ID
        #[arg(short, long)]
        farmer_id: String,
        /// Comma-separated practices
        #[arg(long)]
        practices: String,
        /// Acreage
        #[arg(short, long)]
        acreage: String,
        /// Crop name
        #[arg(short, long)]
        crop: String,
    },
    /// List enrollments
    List {
        /// Filter by verification status
        #[arg(short, long)]
        status: Option<String>,
        /// Limit results
        #[arg(short, long, default_value = "100")]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum InsightCommands {
    /// Generate a synthetic insight for a farmer
    Generate {
        /// Farmer ID
        farmer_id: String,
        /// Observation date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List insights for a farmer
    List {
        /// Farmer ID
        farmer_id: String,
        /// Limit results
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::Init => {
            println!("Initializing farmbase database...");

            let datastore = Arc::new(Datastore::connect(commands::create_db_config(&cli.db_url)).await?);
            let database = FarmDatabase::new(datastore);
            database.init_schema().await?;

            println!("Database schema initialized successfully.");
            Ok(())
        }

        Commands::Start {
            host,
            port,
            admin_token,
        } => {
            println!("Starting farmbase API server on {}:{}...", host, port);

            let datastore = Arc::new(Datastore::connect(commands::create_db_config(&cli.db_url)).await?);
            let connectors = Arc::new(HttpConnectorFactory::default());

            let config = ApiConfig {
                host,
                port,
                enable_cors: true,
                tenant_id: cli.tenant,
                admin_token,
            };

            run_server(config, datastore, connectors).await?;
            Ok(())
        }

        Commands::Status { api_url } => {
            println!("Checking farmbase server status at {}...", api_url);

            let client = reqwest::Client::new();
            let response = client
                .get(format!("{}/health", api_url))
                .send()
                .await?
                .json::<serde_json::Value>()
                .await?;

            println!("Status: {}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }

        Commands::Farmer { action } => {
            commands::handle_farmer_command(action, &cli.db_url, &cli.tenant).await
        }

        Commands::Credit { action } => {
            commands::handle_credit_command(action, &cli.db_url, &cli.tenant).await
        }

        Commands::Insight { action } => {
            commands::handle_insight_command(action, &cli.db_url, &cli.tenant).await
        }
    }
}
