//! Shared response and pagination types.

mod pagination;
mod response;

pub use pagination::{PaginationMeta, PaginationParams};
pub use response::{ApiResponse, Created, ResponseMeta};
