pub mod dtos;
pub mod error;
pub mod generate;
pub mod images;
pub mod models;
pub mod persistence;
pub mod util;
