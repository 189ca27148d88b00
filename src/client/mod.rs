//! REST transports talking to a remote API

pub mod http;

pub use http::HttpTransport;
