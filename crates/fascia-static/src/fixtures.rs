//! Local fixture data injected into the render context.
//!
//! The `cars` collection is a small in-process constant: it comes from no
//! external source and is handed to the content renderer unchanged, under
//! the `myCars` key the content references.

use serde::Serialize;

/// One fixture record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub color: &'static str,

    #[serde(rename = "type")]
    pub kind: &'static str,

    #[serde(rename = "registrationDate")]
    pub registration_date: &'static str,

    pub capacity: u32,
}

/// The fixture collection.
pub fn car_fixtures() -> Vec<Car> {
    vec![
        Car {
            color: "purple",
            kind: "minivan",
            registration_date: "2017-01-03",
            capacity: 7,
        },
        Car {
            color: "red",
            kind: "station wagon",
            registration_date: "2018-03-03",
            capacity: 5,
        },
    ]
}
