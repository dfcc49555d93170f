//! The three link tables and their hydrators.
//!
//! Every pair read loads its record side through the sibling family's
//! repository, one lookup per pair. A pair whose target row is gone is
//! dropped from listings rather than surfaced as an error.

use crate::families::{locations, meals, tours};
use crate::models::{Location, MealMealType, MealType, Tour, TourLocation, UserTour};
use itinera_data::{DataError, LinkDescriptor, Repository};
use itinera_data_sqlx::{EntityRepository, Hydrate, LinkRepository, TypeRepository};
use sqlx::sqlite::SqlitePool;

pub fn tour_locations_descriptor() -> LinkDescriptor {
    LinkDescriptor::new("tour_locations", "tour_id", "location_id")
}

pub fn user_tours_descriptor() -> LinkDescriptor {
    LinkDescriptor::new("user_tours", "user_id", "tour_id")
}

pub fn meal_meal_types_descriptor() -> LinkDescriptor {
    LinkDescriptor::new("meal_meal_types", "meal_id", "meal_type_id")
}

#[derive(Clone)]
pub struct TourLocationHydrator {
    locations: EntityRepository<Location>,
}

impl Hydrate<TourLocation> for TourLocationHydrator {
    async fn hydrate(&self, left: i64, right: i64) -> Result<Option<TourLocation>, DataError> {
        Ok(self
            .locations
            .find_by_id(right)
            .await?
            .map(|location| TourLocation {
                tour_id: left,
                location,
            }))
    }
}

pub fn tour_locations_repository(
    pool: SqlitePool,
) -> LinkRepository<TourLocation, TourLocationHydrator> {
    let hydrator = TourLocationHydrator {
        locations: locations::repository(pool.clone()),
    };
    LinkRepository::new(pool, tour_locations_descriptor(), hydrator)
}

#[derive(Clone)]
pub struct UserTourHydrator {
    tours: EntityRepository<Tour>,
}

impl Hydrate<UserTour> for UserTourHydrator {
    async fn hydrate(&self, left: i64, right: i64) -> Result<Option<UserTour>, DataError> {
        Ok(self
            .tours
            .find_by_id(right)
            .await?
            .map(|tour| UserTour {
                user_id: left,
                tour,
            }))
    }
}

pub fn user_tours_repository(pool: SqlitePool) -> LinkRepository<UserTour, UserTourHydrator> {
    let hydrator = UserTourHydrator {
        tours: tours::repository(pool.clone()),
    };
    LinkRepository::new(pool, user_tours_descriptor(), hydrator)
}

#[derive(Clone)]
pub struct MealMealTypeHydrator {
    meal_types: TypeRepository<MealType>,
}

impl Hydrate<MealMealType> for MealMealTypeHydrator {
    async fn hydrate(&self, left: i64, right: i64) -> Result<Option<MealMealType>, DataError> {
        Ok(self
            .meal_types
            .find_by_id(right)
            .await?
            .map(|meal_type| MealMealType {
                meal_id: left,
                meal_type,
            }))
    }
}

pub fn meal_meal_types_repository(
    pool: SqlitePool,
) -> LinkRepository<MealMealType, MealMealTypeHydrator> {
    let hydrator = MealMealTypeHydrator {
        meal_types: meals::type_repository(pool.clone()),
    };
    LinkRepository::new(pool, meal_meal_types_descriptor(), hydrator)
}
