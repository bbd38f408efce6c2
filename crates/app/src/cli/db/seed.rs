use clap::Args;
use storefront_app::{
    database,
    fixtures::{self, Fixtures},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Skip applying migrations before loading
    #[arg(long)]
    skip_migrations: bool,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    if !args.skip_migrations {
        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to run migrations: {error}"))?;
    }

    let fixtures = Fixtures::bundled().map_err(|error| format!("invalid fixtures: {error}"))?;

    fixtures::seed(&pool, &fixtures)
        .await
        .map_err(|error| format!("failed to seed database: {error}"))?;

    println!(
        "seeded {} categories and {} products",
        fixtures.categories.len(),
        fixtures.products.len()
    );

    Ok(())
}
