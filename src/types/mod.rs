pub mod frames;
pub mod geo_location;
pub mod series;
pub mod weather_data;
