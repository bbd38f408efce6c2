use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use storefront_app::database::{self, DatabaseOptions};

mod category;
mod db;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Category(category::CategoryCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Category(command) => category::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection flags shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        let options = DatabaseOptions {
            max_connections: 1,
            run_migrations: false,
        };

        database::connect(&self.database_url, options)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
