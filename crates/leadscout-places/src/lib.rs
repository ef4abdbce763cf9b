//! Place-lookup collaborator: the [`PlaceLookup`] contract the resolver
//! consumes, and a Google Places web-service client implementing it.

pub mod client;
pub mod error;
pub mod lookup;
pub mod types;

mod retry;

pub use client::GooglePlacesClient;
pub use error::PlacesError;
pub use lookup::PlaceLookup;
