//! Clients for services this API depends on over the network.

mod scraper_client;

pub use scraper_client::{ScraperClient, ScraperGateway};

#[cfg(any(test, feature = "test-utils"))]
pub use scraper_client::MockScraperGateway;
