#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::BoxFuture;
use pdf_quiz_client::models::PDF_MEDIA_TYPE;
use pdf_quiz_client::{
    AppError, AppResult, Document, ExtractionService, FileCandidate, Question, QuizService,
};

/// 按脚本依次返回结果的提取服务
#[derive(Default)]
pub struct ScriptedExtraction {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    pub calls: AtomicUsize,
}

impl ScriptedExtraction {
    /// `Err(status)` 表示服务端返回该状态码
    pub fn new(replies: Vec<Result<String, u16>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExtractionService for ScriptedExtraction {
    fn extract<'a>(&'a self, _document: &'a Document) -> BoxFuture<'a, AppResult<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Err(503));
        Box::pin(async move {
            reply.map_err(|status| AppError::bad_status("/api/upload", status, "scripted"))
        })
    }
}

/// 按脚本依次返回结果的出题服务，同时记录收到的文本
#[derive(Default)]
pub struct ScriptedQuiz {
    replies: Mutex<VecDeque<Result<Vec<Question>, u16>>>,
    pub texts: Mutex<Vec<String>>,
}

impl ScriptedQuiz {
    pub fn new(replies: Vec<Result<Vec<Question>, u16>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl QuizService for ScriptedQuiz {
    fn generate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, AppResult<Vec<Question>>> {
        self.texts.lock().unwrap().push(text.to_string());
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Err(503));
        Box::pin(async move {
            reply.map_err(|status| AppError::bad_status("/api/generate-quiz", status, "scripted"))
        })
    }
}

pub fn question(id: u64, text: &str, options: &[&str], answer: &str) -> Question {
    Question {
        id: id.into(),
        question: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        answer: answer.to_string(),
    }
}

/// 2+2 / 法国首都 两道题
pub fn sample_questions() -> Vec<Question> {
    vec![
        question(1, "2+2?", &["3", "4", "5"], "4"),
        question(2, "Capital of France?", &["Paris", "Rome"], "Paris"),
    ]
}

pub fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, PDF_MEDIA_TYPE, b"%PDF-1.7\n%fake".to_vec())
}
