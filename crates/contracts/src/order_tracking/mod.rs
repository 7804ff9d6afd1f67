//! Order tracking worklist: filters, saved filters, paginated order
//! buckets, comment threads and the table view model.

pub mod comments;
pub mod filters;
pub mod orders;
pub mod pagination;
pub mod providers;
pub mod query;
pub mod request;
pub mod response;
pub mod saved_filters;
pub mod session;
pub mod table;

/// Fixed page size of the orders endpoint
pub const PAGE_SIZE: u32 = 20;
