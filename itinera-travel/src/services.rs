use crate::families::links::{self, TourLocationHydrator};
use crate::families::tours;
use crate::models::{Tour, TourLocation};
use itinera_data::{DataError, Repository};
use itinera_data_sqlx::{EntityRepository, LinkRepository, TypeRepository};
use sqlx::sqlite::SqlitePool;

/// Write-side guard for a classifier family.
///
/// The driver stores whatever it is given; the name contract (non-blank,
/// unique within the family) lives here at the service boundary. Reads go
/// straight to the wrapped repository.
pub struct TypeService<T> {
    repo: TypeRepository<T>,
}

impl<T> TypeService<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(repo: TypeRepository<T>) -> Self {
        TypeService { repo }
    }

    pub fn repository(&self) -> &TypeRepository<T> {
        &self.repo
    }

    async fn ensure_name_free(&self, entity: &T, own_id: Option<i64>) -> Result<(), DataError> {
        let descriptor = self.repo.repository().descriptor();
        let name = descriptor.name_of(entity).unwrap_or_default().to_string();
        if name.trim().is_empty() {
            return Err(DataError::validation(format!(
                "{} name must not be blank",
                descriptor.entity()
            )));
        }
        if let Some(existing) = self.repo.find_by_exact_name(&name).await? {
            if own_id != Some(descriptor.id_of(&existing)) {
                return Err(DataError::validation(format!(
                    "{} name '{name}' is already taken",
                    descriptor.entity()
                )));
            }
        }
        Ok(())
    }

    pub async fn create(&self, entity: T) -> Result<T, DataError> {
        self.ensure_name_free(&entity, None).await?;
        self.repo.create(entity).await
    }

    /// Rename or rewrite; the row may keep its own name.
    pub async fn update(&self, entity: &T) -> Result<bool, DataError> {
        let own_id = self.repo.repository().descriptor().id_of(entity);
        self.ensure_name_free(entity, Some(own_id)).await?;
        self.repo.update(entity).await
    }
}

impl<T> Clone for TypeService<T> {
    fn clone(&self) -> Self {
        TypeService {
            repo: self.repo.clone(),
        }
    }
}

/// Itinerary maintenance over the tour/location link.
#[derive(Clone)]
pub struct TourPlanner {
    tours: EntityRepository<Tour>,
    tour_locations: LinkRepository<TourLocation, TourLocationHydrator>,
}

impl TourPlanner {
    pub fn new(pool: SqlitePool) -> Self {
        TourPlanner {
            tours: tours::repository(pool.clone()),
            tour_locations: links::tour_locations_repository(pool),
        }
    }

    pub async fn locations_of(&self, tour_id: i64) -> Result<Vec<TourLocation>, DataError> {
        self.tour_locations.find_by_left(tour_id).await
    }

    /// Swap a tour's itinerary for `location_ids`, which must be distinct.
    ///
    /// Runs as individual statements: the old pairs are deleted first, then
    /// each new pair is inserted. A failure partway leaves the pairs written
    /// so far in place.
    pub async fn replace_locations(
        &self,
        tour_id: i64,
        location_ids: &[i64],
    ) -> Result<(), DataError> {
        if self.tours.find_by_id(tour_id).await?.is_none() {
            return Err(DataError::validation(format!("tour {tour_id} does not exist")));
        }
        self.tour_locations.delete_all_by_left(tour_id).await?;
        for location_id in location_ids {
            self.tour_locations.create(tour_id, *location_id).await?;
        }
        Ok(())
    }
}
