//! Location model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Location {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationDto {
    pub lat: f64,
    pub lon: f64,
}

impl From<&Location> for LocationDto {
    fn from(location: &Location) -> Self {
        Self {
            lat: location.lat,
            lon: location.lon,
        }
    }
}
