pub mod civil_time;
pub mod client;
pub mod error;
pub mod listing;
pub mod schedule;
pub mod types;

pub use civil_time::{CivilDateTime, DISPLAY_TIMEZONE};
pub use client::{CatalogClient, ProductPage};
pub use error::CatalogError;
pub use listing::list_workshops;
pub use schedule::{schedule_from_graphql, schedule_from_rest};
pub use types::{GraphqlProduct, RestProduct};
