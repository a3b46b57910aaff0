use anyhow::Context;
use clap::{Parser, Subcommand};
use ecommerce_admin::config::ServerConfig;
use ecommerce_admin::db::sqlite::seed::seed_database;
use ecommerce_admin::db::SqliteDb;

#[derive(Debug, Parser)]
#[command(name = "ecommerce-admin", version, about = "E-commerce admin API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the REST API (default)
    Serve,
    /// Fill an empty database with sample categories, products and sales
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    ecommerce_admin::init_tracing();

    let cli = Cli::parse();
    let config = ServerConfig::from_env().context("loading configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => ecommerce_admin::run(config).await?,
        Command::Seed => {
            let db = SqliteDb::new(&config.database_path, config.pool_size)
                .context("opening database")?;
            let mut conn = db.conn()?;
            let now = chrono::Utc::now().naive_utc();
            match seed_database(&mut conn, &mut rand::thread_rng(), now)? {
                Some(report) => println!(
                    "Seeded {} categories, {} products, {} sales",
                    report.categories, report.products, report.sales
                ),
                None => println!("Database already contains data. Skipping seeding."),
            }
        }
    }

    Ok(())
}
