//! Applies the Kontor schema and integrity triggers.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`). Subcommands follow
//! sea-orm-migration: `up`, `down`, `status`, `fresh`, `refresh`, `reset`.

use kontor_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
