//! Directory API example: an in-memory store seeded with sample advocates
//!
//! ```sh
//! cargo run --example directory_api
//! curl 'http://127.0.0.1:3000/advocates?query=san&sortField=yearsOfExperience&sortDirection=desc'
//! ```
//!
//! Set `DIRECTORY_CONFIG` to a YAML file to override the defaults.

use directory::prelude::*;
use tracing_subscriber::EnvFilter;

fn sample_advocates() -> Vec<NewAdvocate> {
    vec![
        NewAdvocate::new("John", "Doe", "New York", "MD", &["Bipolar", "LGBTQ"], 10, 5551234567),
        NewAdvocate::new("Jane", "Smith", "Los Angeles", "PhD", &["Trauma & PTSD"], 8, 5559876543),
        NewAdvocate::new("Alice", "Johnson", "Chicago", "MSW", &["Personality disorders"], 5, 5554567890),
        NewAdvocate::new("Michael", "Brown", "Houston", "MD", &["Substance use"], 12, 5556543210),
        NewAdvocate::new("Emily", "Davis", "Phoenix", "PhD", &["Eating disorders"], 7, 5553210987),
        NewAdvocate::new("Chris", "Martinez", "Philadelphia", "MSW", &["Grief"], 15, 5557890123),
        NewAdvocate::new("Jessica", "Taylor", "San Antonio", "MD", &["Chronic pain"], 9, 5554561234),
        NewAdvocate::new("David", "Harris", "San Diego", "PhD", &["Sleep issues"], 15, 5557896543),
        NewAdvocate::new("Anne", "Clark", "Dallas", "MSW", &["Life coaching"], 3, 5550123456),
        NewAdvocate::new("Daniel", "Lewis", "San Jose", "MD", &["Men's issues"], 6, 5553217654),
        NewAdvocate::new("Joanne", "Walker", "Austin", "PhD", &["Women's issues"], 4, 5551238765),
        NewAdvocate::new("Robert", "Hall", "Jacksonville", "MSW", &["Domestic abuse"], 2, 5559871234),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("DIRECTORY_CONFIG") {
        Ok(path) => DirectoryConfig::from_yaml_file(&path)?,
        Err(_) => DirectoryConfig::default(),
    };

    let store = InMemoryAdvocateStore::new();
    let seeded = store.insert_many(sample_advocates())?;
    tracing::info!(count = seeded.len(), "Seeded advocate directory");

    ServerBuilder::new()
        .with_store(store)
        .with_config(config)
        .serve()
        .await
}
