pub mod extraction_service;
pub mod quiz_service;

pub use extraction_service::ExtractionService;
pub use quiz_service::QuizService;
