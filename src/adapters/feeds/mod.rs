//! Price Feed Adapters
//!
//! - `HttpPriceFeed`: JSON price list fetched over HTTP(S)

pub mod http_prices;

pub use http_prices::HttpPriceFeed;
