pub mod client;
pub mod error;
pub mod factory;
pub mod google;
pub mod parse;

pub use client::{ExplorePayload, RankedLists, RelatedQueries, TrendsClient};
pub use error::ClientError;
pub use factory::{ClientFactory, HttpClientFactory};
pub use google::GoogleTrendsClient;
