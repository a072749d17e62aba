pub mod url;

pub use url::{ApiResponse, DeleteUrlRequest, SaveUrlRequest, Status, UrlRecord};
