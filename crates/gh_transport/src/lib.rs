pub mod error;
pub mod metrics;
pub mod model;
pub mod transport;

pub use error::TransportError;
pub use model::{parse_rate_limit, RateLimitUpdate};
pub use transport::{
    HttpExec, HttpTransport, HttpTransportFactory, ReqwestExecutor, Transport, TransportFactory,
};
