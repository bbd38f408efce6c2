use clap::Args;
use storefront_app::{
    database::Db,
    domain::categories::{CategoriesService, PgCategoriesService, data::NewCategory},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category name, matched case-sensitively
    #[arg(long)]
    name: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let category = PgCategoriesService::new(Db::new(pool))
        .create_category(NewCategory { name: args.name })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category: {}", category.name);

    Ok(())
}
