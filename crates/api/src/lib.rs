pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;

pub use routes::{build_router, ApiState};
