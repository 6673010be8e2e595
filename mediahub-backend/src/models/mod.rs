mod event;
mod listing;

pub use event::{ApiEvent, ApiResponse, ALLOWED_HEADERS, ALLOWED_METHODS};
pub use listing::{Listing, SortOrder};
