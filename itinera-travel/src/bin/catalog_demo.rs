//! Seeds an in-memory catalog and walks through the query surface:
//! filtered searches with conditional joins, range and keyword filters,
//! the name contract on classifiers and itinerary maintenance.
//!
//! ```sh
//! RUST_LOG=debug cargo run --bin catalog_demo
//! ```

use itinera_data::prelude::*;
use itinera_travel::{Catalog, Location, LocationType, Meal, MealType, Tour, TourType, User};
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await?;
    itinera_travel::create_schema(&pool).await?;
    let catalog = Catalog::new(pool);

    seed(&catalog).await?;

    let all = catalog.tours.find_all().await?;
    tracing::info!(count = all.len(), "tours in the catalog");

    let filter = Filter::new().with("country", "France");
    for tour in catalog.tours.search(&filter).await? {
        tracing::info!(name = %tour.name, price = tour.price, "tour visiting France");
    }

    let band = Filter::new().with("minPrice", 80i64).with("maxPrice", 120i64);
    for tour in catalog.tours.search(&band).await? {
        tracing::info!(name = %tour.name, price = tour.price, "tour in the 80-120 band");
    }

    let first_page = catalog
        .tours
        .search_with(&Filter::new(), &QueryOptions::ordered_by("name").limit(2))
        .await?;
    for tour in &first_page {
        tracing::info!(name = %tour.name, "first page, by name");
    }

    let json = serde_json::json!({ "keyword": "par" });
    for location in catalog.locations.search(&Filter::from_json(json)?).await? {
        tracing::info!(
            name = %location.name,
            kind = location.location_type_name.as_deref().unwrap_or("-"),
            "location matching 'par'"
        );
    }

    match catalog.tour_types.create(TourType::new("Cultural")).await {
        Err(err) => tracing::info!(%err, "duplicate classifier rejected"),
        Ok(_) => tracing::warn!("duplicate classifier was accepted"),
    }

    let city_lights = catalog
        .tours
        .search(&Filter::new().with("name", "City Lights"))
        .await?
        .into_iter()
        .next()
        .ok_or("seeded tour missing")?;
    for stop in catalog.planner.locations_of(city_lights.id).await? {
        tracing::info!(stop = %stop.location.name, "itinerary stop");
    }

    Ok(())
}

async fn seed(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let city = catalog.location_types.create(LocationType::new("City")).await?;
    let seaside = catalog
        .location_types
        .create(LocationType::new("Seaside"))
        .await?;

    let paris = catalog
        .locations
        .create(Location::new("Paris", "France").with_type(city.id))
        .await?;
    let nice = catalog
        .locations
        .create(Location::new("Nice", "France").with_type(seaside.id))
        .await?;
    let rome = catalog
        .locations
        .create(Location::new("Rome", "Italy").with_type(city.id))
        .await?;

    let cultural = catalog.tour_types.create(TourType::new("Cultural")).await?;
    let hiking = catalog.tour_types.create(TourType::new("Hiking")).await?;

    let city_lights = catalog
        .tours
        .create(Tour::new("City Lights", 100).with_type(cultural.id))
        .await?;
    let riviera = catalog
        .tours
        .create(Tour::new("Riviera Week", 150).with_type(cultural.id))
        .await?;
    catalog
        .tours
        .create(Tour::new("Alpine Trek", 50).with_type(hiking.id))
        .await?;

    catalog
        .planner
        .replace_locations(city_lights.id, &[paris.id, rome.id])
        .await?;
    catalog
        .planner
        .replace_locations(riviera.id, &[nice.id])
        .await?;

    let veggie = catalog.meal_types.create(MealType::new("Vegetarian")).await?;
    let dinner = catalog.meals.create(Meal::new("Ratatouille", 15)).await?;
    catalog.meal_meal_types.create(dinner.id, veggie.id).await?;

    let traveller = catalog.users.create(User::new("alice", "s3cret")).await?;
    catalog.user_tours.create(traveller.id, city_lights.id).await?;

    Ok(())
}
