use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_destinations::{
    config::Config, init_service, message::AppError, services::DestinationService,
};

/// Maintenance commands for the destinations database.
#[derive(Parser)]
#[command(name = "travel-admin", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database file and apply migrations
    InitDb,
    /// Print every stored destination
    List,
    /// Delete destinations (and their image files) by id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Deletion {
    Deleted { id: i64, changes: u64 },
    Missing(i64),
}

/// Deletes each id in turn. Unknown ids are reported and skipped, any other
/// failure stops the run.
async fn delete_ids(service: &DestinationService, ids: &[i64]) -> Result<Vec<Deletion>, AppError> {
    let mut report = Vec::with_capacity(ids.len());
    for &id in ids {
        match service.delete(id).await {
            Ok(changes) => report.push(Deletion::Deleted { id, changes }),
            Err(AppError::NotFound(id)) => report.push(Deletion::Missing(id)),
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_destinations=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let service = init_service(&config).await?;

    match cli.command {
        Command::InitDb => {
            println!("Table 'destinations' is ready in {}", config.database_url);
        }
        Command::List => {
            for d in service.list().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    d.id,
                    d.name,
                    d.location,
                    d.background_image.as_deref().unwrap_or("-"),
                    d.gallery_image.as_deref().unwrap_or("-"),
                );
            }
        }
        Command::Delete { ids } => {
            for deletion in delete_ids(&service, &ids).await? {
                match deletion {
                    Deletion::Deleted { id, changes } => {
                        println!("Row(s) deleted {changes} (id {id})")
                    }
                    Deletion::Missing(id) => eprintln!("No destination with id {id}"),
                }
            }
        }
    }

    Ok(())
}
