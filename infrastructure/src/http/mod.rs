//! HTTP adapter for the backend transport port.

mod transport;

pub use transport::HttpTransport;
