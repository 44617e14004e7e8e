use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trip_budget::{
    Result, TripStore,
    config::{
        self,
        settings::{AppConfig, StorageBackend},
    },
    core::{
        report::{self, BudgetReport},
        trip::upcoming_trips,
    },
    store::{DatabaseTripStore, MemoryTripStore},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Load settings and compose the store they ask for
    let app_config = config::settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(storage = ?app_config.storage, "Configuration loaded");

    match app_config.storage {
        StorageBackend::Memory => run(&MemoryTripStore::new()).await,
        StorageBackend::Database => {
            let store = connect(&app_config).await?;
            run(&store).await
        }
    }
}

async fn connect(app_config: &AppConfig) -> Result<DatabaseTripStore> {
    let url = config::database::get_database_url(app_config.database_url.as_deref());
    let db = config::database::create_connection(&url)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    Ok(DatabaseTripStore::new(db))
}

/// Prints the upcoming trips and the budget of the current one.
async fn run<S: TripStore>(store: &S) -> Result<()> {
    let trips = store.list_trips().await?;
    let upcoming = upcoming_trips(&trips);
    println!("{} trip(s), {} upcoming", trips.len(), upcoming.len());
    for trip in upcoming {
        println!(
            "  #{} {} ({} - {}) budget {:.0}",
            trip.id,
            trip.name,
            trip.start_date,
            trip.end_date,
            trip.total_budget()
        );
    }

    match report::current_trip_report(store, None).await? {
        Some(report) => print_report(&report),
        None => println!("No trips yet. Plan one to start budgeting."),
    }
    Ok(())
}

fn print_report(report: &BudgetReport) {
    let summary = &report.summary;

    println!("\n{}", report.trip.name);
    println!(
        "{} spent {:.0} of {:.0}",
        report::format_progress_bar(summary.display_percentage, Some(20)),
        summary.total_spent,
        summary.total_budget
    );
    for row in &summary.categories {
        println!(
            "  {:<16} {} {:.0} / {:.0}",
            row.category.display_name(),
            report::format_progress_bar(row.percentage, None),
            row.spent,
            row.allocated
        );
    }
    for (category, spent) in &summary.unallocated {
        println!(
            "  {:<16} no budget, spent {spent:.0}",
            category.display_name()
        );
    }
    for movement in &report.recent_movements {
        println!(
            "  {} {} [{}] {:.0}",
            movement.date.format("%Y-%m-%d %H:%M"),
            movement.name,
            movement.category.display_name(),
            movement.amount
        );
    }
}
