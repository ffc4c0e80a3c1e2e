//! Price feed clients

pub mod http_price_source;

pub use http_price_source::HttpPriceSource;
