pub mod api_client;

pub use api_client::{ApiClient, GENERATE_QUIZ_PATH, UPLOAD_PATH};
