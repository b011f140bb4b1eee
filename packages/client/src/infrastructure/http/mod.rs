//! REST transport implementations.

pub mod transport;

pub use transport::ReqwestTransport;
