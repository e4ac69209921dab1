pub mod distribution;
pub mod errors;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
