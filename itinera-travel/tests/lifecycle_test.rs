use itinera_data::prelude::*;
use itinera_data::DataError;
use itinera_travel::{Catalog, Location, LocationType, Transport, TransportType, User};
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

#[tokio::test]
async fn create_then_read_back_preserves_every_field() {
    let catalog = setup().await;
    let seaside = catalog
        .location_types
        .create(LocationType::new("Seaside"))
        .await
        .unwrap();

    let nice = catalog
        .locations
        .create(Location::new("Nice", "France").with_type(seaside.id))
        .await
        .unwrap();
    assert!(nice.id > 0);

    let found = catalog.locations.find_by_id(nice.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Nice");
    assert_eq!(found.country, "France");
    assert_eq!(found.location_type_id, Some(seaside.id));
    assert_eq!(found.location_type_name.as_deref(), Some("Seaside"));
}

#[tokio::test]
async fn update_rewrites_the_full_row() {
    let catalog = setup().await;
    let mut nice = catalog
        .locations
        .create(Location::new("Nice", "France"))
        .await
        .unwrap();

    nice.name = "Nizza".into();
    nice.country = "Italy".into();
    assert!(catalog.locations.update(&nice).await.unwrap());

    let found = catalog.locations.find_by_id(nice.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Nizza");
    assert_eq!(found.country, "Italy");

    assert!(!catalog.locations.update_with_id(&nice, 9999).await.unwrap());
}

#[tokio::test]
async fn updating_an_unsaved_entity_is_rejected() {
    let catalog = setup().await;
    let ghost = Location::new("Ghost", "Nowhere");

    let err = catalog.locations.update(&ghost).await.unwrap_err();
    assert!(matches!(err, DataError::Validation(_)));
}

#[tokio::test]
async fn delete_then_lookups_return_absence() {
    let catalog = setup().await;
    let nice = catalog
        .locations
        .create(Location::new("Nice", "France"))
        .await
        .unwrap();

    assert!(catalog.locations.delete(nice.id).await.unwrap());
    assert!(!catalog.locations.delete(nice.id).await.unwrap());
    assert_eq!(catalog.locations.find_by_id(nice.id).await.unwrap(), None);
    assert!(catalog.locations.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn transport_rows_carry_their_classifier() {
    let catalog = setup().await;
    let rail = catalog
        .transport_types
        .create(TransportType::new("Rail"))
        .await
        .unwrap();
    let tgv = catalog
        .transports
        .create(Transport::new("TGV", 45).with_type(rail.id))
        .await
        .unwrap();

    let found = catalog.transports.find_by_id(tgv.id).await.unwrap().unwrap();
    assert_eq!(found.price, 45);
    assert_eq!(found.transport_type_name.as_deref(), Some("Rail"));

    let by_type = catalog
        .transports
        .search(&Filter::new().with("transport_type", "Rail"))
        .await
        .unwrap();
    assert_eq!(by_type.len(), 1);
}

#[tokio::test]
async fn classifier_names_must_be_non_blank_and_unique() {
    let catalog = setup().await;
    catalog
        .location_types
        .create(LocationType::new("City"))
        .await
        .unwrap();

    let dup = catalog.location_types.create(LocationType::new("City")).await;
    assert!(matches!(dup, Err(DataError::Validation(_))));

    let blank = catalog.location_types.create(LocationType::new("  ")).await;
    assert!(matches!(blank, Err(DataError::Validation(_))));
}

#[tokio::test]
async fn renaming_a_classifier_respects_the_contract() {
    let catalog = setup().await;
    let city = catalog
        .location_types
        .create(LocationType::new("City"))
        .await
        .unwrap();
    let mut seaside = catalog
        .location_types
        .create(LocationType::new("Seaside"))
        .await
        .unwrap();

    // keeping its own name is not a collision
    assert!(catalog.location_types.update(&city).await.unwrap());

    seaside.name = "City".into();
    let err = catalog.location_types.update(&seaside).await;
    assert!(matches!(err, Err(DataError::Validation(_))));

    seaside.name = "Coast".into();
    assert!(catalog.location_types.update(&seaside).await.unwrap());
}

#[tokio::test]
async fn name_lookups_on_a_classifier_family() {
    let catalog = setup().await;
    for name in ["City", "Citadel", "Seaside"] {
        catalog
            .location_types
            .create(LocationType::new(name))
            .await
            .unwrap();
    }
    let types = catalog.location_types.repository();

    let cit = types.find_by_name("cit").await.unwrap();
    assert_eq!(cit.len(), 2);

    let exact = types.find_by_exact_name("City").await.unwrap();
    assert_eq!(exact.map(|t| t.name), Some("City".to_string()));
    assert_eq!(types.find_by_exact_name("Cit").await.unwrap(), None);

    assert!(types.exists_with_name("Seaside").await.unwrap());
    assert!(!types.exists_with_name("Harbor").await.unwrap());
}

#[tokio::test]
async fn user_lifecycle_with_flags() {
    let catalog = setup().await;
    let mut alice = catalog.users.create(User::new("alice", "pw")).await.unwrap();

    alice.active = false;
    assert!(catalog.users.update(&alice).await.unwrap());

    let inactive = catalog
        .users
        .search(&Filter::new().with("isActive", false))
        .await
        .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].username, "alice");

    // the logical `name` key reaches the username column
    let by_name = catalog
        .users
        .search(&Filter::new().with("name", "alice"))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);

    assert_eq!(catalog.users.count(&Filter::new()).await.unwrap(), 1);
}
