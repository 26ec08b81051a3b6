pub mod answer;
pub mod api;
pub mod document;
pub mod question;
pub mod state;

pub use answer::AnswerMap;
pub use api::{GenerateQuizRequest, GenerateQuizResponse, UploadResponse};
pub use document::{media_type_for, Document, FileCandidate, PDF_MEDIA_TYPE};
pub use question::{Question, QuestionId, QuestionSet};
pub use state::SessionState;
