use crate::families::links::{
    self, MealMealTypeHydrator, TourLocationHydrator, UserTourHydrator,
};
use crate::families::{locations, meals, tours, transports, users};
use crate::models::{
    Location, LocationType, Meal, MealMealType, MealType, Tour, TourLocation, TourType,
    Transport, TransportType, User, UserTour, UserType,
};
use crate::services::{TourPlanner, TypeService};
use itinera_data_sqlx::{EntityRepository, LinkRepository};
use sqlx::sqlite::SqlitePool;

/// Every repository and service of the travel catalog, wired over one pool.
///
/// Entity families expose the generic driver directly; classifier families
/// are wrapped in [`TypeService`] so writes pass the name contract. All
/// handles share the pool and clone cheaply.
#[derive(Clone)]
pub struct Catalog {
    pub locations: EntityRepository<Location>,
    pub location_types: TypeService<LocationType>,
    pub tours: EntityRepository<Tour>,
    pub tour_types: TypeService<TourType>,
    pub transports: EntityRepository<Transport>,
    pub transport_types: TypeService<TransportType>,
    pub meals: EntityRepository<Meal>,
    pub meal_types: TypeService<MealType>,
    pub users: EntityRepository<User>,
    pub user_types: TypeService<UserType>,
    pub tour_locations: LinkRepository<TourLocation, TourLocationHydrator>,
    pub user_tours: LinkRepository<UserTour, UserTourHydrator>,
    pub meal_meal_types: LinkRepository<MealMealType, MealMealTypeHydrator>,
    pub planner: TourPlanner,
}

impl Catalog {
    pub fn new(pool: SqlitePool) -> Self {
        Catalog {
            locations: locations::repository(pool.clone()),
            location_types: TypeService::new(locations::type_repository(pool.clone())),
            tours: tours::repository(pool.clone()),
            tour_types: TypeService::new(tours::type_repository(pool.clone())),
            transports: transports::repository(pool.clone()),
            transport_types: TypeService::new(transports::type_repository(pool.clone())),
            meals: meals::repository(pool.clone()),
            meal_types: TypeService::new(meals::type_repository(pool.clone())),
            users: users::repository(pool.clone()),
            user_types: TypeService::new(users::type_repository(pool.clone())),
            tour_locations: links::tour_locations_repository(pool.clone()),
            user_tours: links::user_tours_repository(pool.clone()),
            meal_meal_types: links::meal_meal_types_repository(pool.clone()),
            planner: TourPlanner::new(pool),
        }
    }
}
