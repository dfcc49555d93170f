use itinera_data::UNSAVED_ID;
use serde::{Deserialize, Serialize};

/// A place a tour can visit. Carries its classifier's display name, filled
/// from the always-on join; the id alone travels on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub location_type_id: Option<i64>,
    pub location_type_name: Option<String>,
}

impl Location {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Location {
            id: UNSAVED_ID,
            name: name.into(),
            country: country.into(),
            location_type_id: None,
            location_type_name: None,
        }
    }

    pub fn with_type(mut self, location_type_id: i64) -> Self {
        self.location_type_id = Some(location_type_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: i64,
    pub name: String,
    /// Whole currency units; the catalog never deals in fractions.
    pub price: i64,
    pub active: bool,
    pub tour_type_id: Option<i64>,
}

impl Tour {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Tour {
            id: UNSAVED_ID,
            name: name.into(),
            price,
            active: true,
            tour_type_id: None,
        }
    }

    pub fn with_type(mut self, tour_type_id: i64) -> Self {
        self.tour_type_id = Some(tour_type_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub transport_type_id: Option<i64>,
    pub transport_type_name: Option<String>,
}

impl Transport {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Transport {
            id: UNSAVED_ID,
            name: name.into(),
            price,
            transport_type_id: None,
            transport_type_name: None,
        }
    }

    pub fn with_type(mut self, transport_type_id: i64) -> Self {
        self.transport_type_id = Some(transport_type_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

impl Meal {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Meal {
            id: UNSAVED_ID,
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub active: bool,
    pub user_type_id: Option<i64>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            id: UNSAVED_ID,
            username: username.into(),
            password: password.into(),
            active: true,
            user_type_id: None,
        }
    }

    pub fn with_type(mut self, user_type_id: i64) -> Self {
        self.user_type_id = Some(user_type_id);
        self
    }
}

macro_rules! classifier {
    ($name:ident) => {
        /// Pure (id, name) classifier record.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub id: i64,
            pub name: String,
        }

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                $name {
                    id: UNSAVED_ID,
                    name: name.into(),
                }
            }
        }
    };
}

classifier!(LocationType);
classifier!(TourType);
classifier!(TransportType);
classifier!(MealType);
classifier!(UserType);

/// One stored tour/location pair with the location loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourLocation {
    pub tour_id: i64,
    pub location: Location,
}

/// One stored user/tour pair with the tour loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTour {
    pub user_id: i64,
    pub tour: Tour,
}

/// One stored meal/meal-type pair with the classifier loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealMealType {
    pub meal_id: i64,
    pub meal_type: MealType,
}
