//! Weather provider adapters

mod openweather;

pub use openweather::OpenWeatherClient;
