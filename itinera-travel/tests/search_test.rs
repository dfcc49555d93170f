use itinera_data::prelude::*;
use itinera_data::DataError;
use itinera_travel::{Catalog, Location, LocationType, Meal, MealType, Tour, TourType, Transport};
use sqlx::sqlite::SqlitePoolOptions;

async fn setup() -> Catalog {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    itinera_travel::create_schema(&pool).await.unwrap();
    Catalog::new(pool)
}

/// Paris and Rome as city stops, Nice as seaside, three tours with
/// prices 50, 100 and 150. "City Lights" visits Paris and Nice.
async fn seed_tours(catalog: &Catalog) -> (Tour, Tour, Tour) {
    let city = catalog
        .location_types
        .create(LocationType::new("City"))
        .await
        .unwrap();
    let seaside = catalog
        .location_types
        .create(LocationType::new("Seaside"))
        .await
        .unwrap();

    let paris = catalog
        .locations
        .create(Location::new("Paris", "France").with_type(city.id))
        .await
        .unwrap();
    let nice = catalog
        .locations
        .create(Location::new("Nice", "France").with_type(seaside.id))
        .await
        .unwrap();
    let rome = catalog
        .locations
        .create(Location::new("Rome", "Italy").with_type(city.id))
        .await
        .unwrap();

    let cultural = catalog
        .tour_types
        .create(TourType::new("Cultural"))
        .await
        .unwrap();
    let hiking = catalog
        .tour_types
        .create(TourType::new("Hiking"))
        .await
        .unwrap();

    let cheap = catalog
        .tours
        .create(Tour::new("Alpine Trek", 50).with_type(hiking.id))
        .await
        .unwrap();
    let mid = catalog
        .tours
        .create(Tour::new("City Lights", 100).with_type(cultural.id))
        .await
        .unwrap();
    let dear = catalog
        .tours
        .create(Tour::new("Roman Holiday", 150).with_type(cultural.id))
        .await
        .unwrap();

    catalog
        .planner
        .replace_locations(mid.id, &[paris.id, nice.id])
        .await
        .unwrap();
    catalog
        .planner
        .replace_locations(dear.id, &[rome.id])
        .await
        .unwrap();

    (cheap, mid, dear)
}

#[tokio::test]
async fn country_filter_reaches_through_the_link_without_duplicates() {
    let catalog = setup().await;
    let (_, mid, _) = seed_tours(&catalog).await;

    // City Lights visits two French stops; it must still come back once
    let hits = catalog
        .tours
        .search(&Filter::new().with("country", "France"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, mid.id);

    let italy = catalog
        .tours
        .search(&Filter::new().with("country", "Italy"))
        .await
        .unwrap();
    assert_eq!(italy.len(), 1);
    assert_eq!(italy[0].name, "Roman Holiday");
}

#[tokio::test]
async fn count_matches_search_under_the_fanning_join() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let filter = Filter::new().with("country", "France");
    let hits = catalog.tours.search(&filter).await.unwrap();
    let count = catalog.tours.count(&filter).await.unwrap();
    assert_eq!(count, hits.len() as u64);
}

#[tokio::test]
async fn price_band_returns_exactly_the_inner_tour() {
    let catalog = setup().await;
    let (_, mid, _) = seed_tours(&catalog).await;

    let filter = Filter::new().with("minPrice", 80i64).with("maxPrice", 120i64);
    let hits = catalog.tours.search(&filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, mid.id);
    assert_eq!(hits[0].price, 100);
}

#[tokio::test]
async fn transport_price_band_selects_the_inner_row() {
    let catalog = setup().await;
    for (name, price) in [("Bus", 10), ("Train", 25), ("Plane", 40)] {
        catalog
            .transports
            .create(Transport::new(name, price))
            .await
            .unwrap();
    }

    let filter = Filter::new().with("minPrice", 20i64).with("maxPrice", 30i64);
    let hits = catalog.transports.search(&filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Train");
    assert_eq!(hits[0].price, 25);
}

#[tokio::test]
async fn keyword_matches_paris_but_not_rome() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let hits = catalog
        .locations
        .search(&Filter::new().with("keyword", "par"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Paris");
}

#[tokio::test]
async fn classifier_filter_pulls_its_join_only_when_present() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let cultural = catalog
        .tours
        .search(&Filter::new().with("tour_type", "Cultural"))
        .await
        .unwrap();
    assert_eq!(cultural.len(), 2);

    // no classifier filter: a tour without a type would still be listed
    let untyped = catalog.tours.create(Tour::new("Mystery Trip", 75)).await.unwrap();
    let all = catalog.tours.find_all().await.unwrap();
    assert!(all.iter().any(|t| t.id == untyped.id));
}

#[tokio::test]
async fn ordering_by_a_classifier_key_pulls_its_join() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let hits = catalog
        .tours
        .search_with(&Filter::new(), &QueryOptions::ordered_by("tour_type"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 3);
    // "Hiking" sorts after "Cultural"
    assert_eq!(hits[2].name, "Alpine Trek");
}

#[tokio::test]
async fn active_flag_filters_tours() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let mut retired = Tour::new("Retired Tour", 60);
    retired.active = false;
    catalog.tours.create(retired).await.unwrap();

    let active = catalog
        .tours
        .search(&Filter::new().with("isActive", true))
        .await
        .unwrap();
    assert_eq!(active.len(), 3);

    let inactive = catalog
        .tours
        .search(&Filter::new().with("isActive", false))
        .await
        .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].name, "Retired Tour");
}

#[tokio::test]
async fn location_reads_carry_the_classifier_name() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let paris = catalog
        .locations
        .search(&Filter::new().with("name", "Paris"))
        .await
        .unwrap()
        .remove(0);
    assert_eq!(paris.location_type_name.as_deref(), Some("City"));

    let seaside = catalog
        .locations
        .search(&Filter::new().with("locationType", "Seaside"))
        .await
        .unwrap();
    assert_eq!(seaside.len(), 1);
    assert_eq!(seaside[0].name, "Nice");
}

#[tokio::test]
async fn meal_type_filter_goes_through_the_link() {
    let catalog = setup().await;
    let veggie = catalog
        .meal_types
        .create(MealType::new("Vegetarian"))
        .await
        .unwrap();
    let vegan = catalog
        .meal_types
        .create(MealType::new("Vegan"))
        .await
        .unwrap();

    let ratatouille = catalog
        .meals
        .create(Meal::new("Ratatouille", 15))
        .await
        .unwrap();
    catalog.meals.create(Meal::new("Beef Stew", 18)).await.unwrap();
    catalog
        .meal_meal_types
        .create(ratatouille.id, veggie.id)
        .await
        .unwrap();
    catalog
        .meal_meal_types
        .create(ratatouille.id, vegan.id)
        .await
        .unwrap();

    let hits = catalog
        .meals
        .search(&Filter::new().with("meal_types", "Vegetarian"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, ratatouille.id);

    // a meal with no classifier never matches the link-backed key
    let none = catalog
        .meals
        .search(&Filter::new().with("meal_types", "Carnivore"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn json_filters_drive_the_same_vocabulary() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let filter = Filter::from_json(serde_json::json!({
        "country": "France",
        "maxPrice": 120
    }))
    .unwrap();
    let hits = catalog.tours.search(&filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "City Lights");
}

#[tokio::test]
async fn unknown_keys_fail_loudly() {
    let catalog = setup().await;
    seed_tours(&catalog).await;

    let err = catalog
        .tours
        .search(&Filter::new().with("countryy", "France"))
        .await
        .unwrap_err();
    match err {
        DataError::UnknownKey { entity, key } => {
            assert_eq!(entity, "tours");
            assert_eq!(key, "countryy");
        }
        other => panic!("unexpected error: {other}"),
    }
}
