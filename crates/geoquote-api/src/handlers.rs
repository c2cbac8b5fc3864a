mod address;
mod health;
mod quote;

pub use address::{reverse_geocode, search_address};
pub use health::health_check;
pub use quote::calculate_quote;
