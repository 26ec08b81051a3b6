//! 终端应用 - 编排层
//!
//! ## 职责
//!
//! 持有会话和服务，把用户输入转换为会话操作：
//!
//! 1. **选择文件**：读取 PDF，非 PDF 在发出任何请求前被拒绝
//! 2. **上传提取**：失败时询问是否手动重试
//! 3. **生成测验**：失败时文本保留，可直接重试
//! 4. **答题**：逐题作答，全部作答后才能提交
//! 5. **批改**：展示 ✓ / ✗ 和得分

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::AsyncBufRead;
use tracing::{error, info, warn};

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{FileCandidate, Question, SessionState};
use crate::orchestrator::prompt::Prompt;
use crate::orchestrator::view::{
    parse_choice, render_extracted, render_no_questions, render_question, render_results,
};
use crate::services::{ExtractionService, QuizService};
use crate::utils::logging::{log_extracted, log_score, log_startup};
use crate::workflow::{QuizSessionController, QuizView, Session};

/// 一轮流程的结局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 完成测验并评分
    Graded,
    /// 文件被拒绝
    Rejected,
    /// 用户放弃
    Abandoned,
}

/// 应用主结构
pub struct App {
    config: Config,
    extraction: Arc<dyn ExtractionService>,
    quiz_service: Arc<dyn QuizService>,
    session: Session,
}

impl App {
    /// 初始化应用，连接真实后端
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = ApiClient::new(&config).context("无法创建 HTTP 客户端")?;
        match client.health_check().await {
            Ok(()) => info!("✓ 后端在线"),
            Err(e) => warn!("⚠️ 后端暂不可用: {}", e),
        }

        let client = Arc::new(client);
        Ok(Self::with_services(config, client.clone(), client))
    }

    /// 使用自定义服务创建应用
    pub fn with_services(
        config: Config,
        extraction: Arc<dyn ExtractionService>,
        quiz_service: Arc<dyn QuizService>,
    ) -> Self {
        Self {
            config,
            extraction,
            quiz_service,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 从标准输入读取作答
    pub async fn run(&mut self, pdf_path: &Path) -> Result<RunOutcome> {
        let mut prompt = Prompt::stdin();
        self.run_with(pdf_path, &mut prompt).await
    }

    /// 运行完整流程
    pub async fn run_with<R: AsyncBufRead + Unpin>(
        &mut self,
        pdf_path: &Path,
        prompt: &mut Prompt<R>,
    ) -> Result<RunOutcome> {
        let candidate = FileCandidate::from_path(pdf_path)
            .await
            .with_context(|| format!("无法读取文件: {}", pdf_path.display()))?;

        if let Err(e) = self.session.select_file(candidate) {
            println!("{}", e);
            return Ok(RunOutcome::Rejected);
        }

        if !self.extract(prompt).await? {
            return Ok(RunOutcome::Abandoned);
        }

        let text = self.session.extracted_text();
        let file_name = self
            .session
            .ingestion()
            .document()
            .map(|d| d.name().to_string())
            .unwrap_or_default();
        print!("{}", render_extracted(&file_name, text));
        log_extracted(&file_name, text, self.config.preview_chars);

        if !self.generate(prompt).await? {
            return Ok(RunOutcome::Abandoned);
        }

        self.take_quiz(prompt).await
    }

    /// 上传并提取，返回是否成功
    async fn extract<R: AsyncBufRead + Unpin>(&mut self, prompt: &mut Prompt<R>) -> Result<bool> {
        loop {
            let result = self.session.scan(self.extraction.as_ref()).await;
            if self.session.state() == SessionState::Extracted {
                return Ok(true);
            }
            if !self.offer_retry(result.err(), prompt).await? {
                self.session.remove_file();
                return Ok(false);
            }
        }
    }

    /// 生成测验，返回是否成功
    async fn generate<R: AsyncBufRead + Unpin>(&mut self, prompt: &mut Prompt<R>) -> Result<bool> {
        loop {
            let result = self.session.generate_quiz(self.quiz_service.as_ref()).await;
            if self.session.state() == SessionState::QuizReady {
                return Ok(true);
            }
            if !self.offer_retry(result.err(), prompt).await? {
                return Ok(false);
            }
        }
    }

    /// 显示错误并询问是否重试；不可重试的错误直接向上返回
    async fn offer_retry<R: AsyncBufRead + Unpin>(
        &self,
        err: Option<AppError>,
        prompt: &mut Prompt<R>,
    ) -> Result<bool> {
        match err {
            Some(e) if e.is_retryable() => {
                error!("❌ {}", e);
                if let Some(status) = self.session.status_message() {
                    println!("{}", status);
                }
                prompt.confirm("是否重试?", false).await
            }
            Some(e) => Err(e.into()),
            None => Ok(false),
        }
    }

    /// 逐题作答，确认后提交；提交前可以修改任意一题
    async fn take_quiz<R: AsyncBufRead + Unpin>(
        &mut self,
        prompt: &mut Prompt<R>,
    ) -> Result<RunOutcome> {
        let quiz = match self.session.quiz_view() {
            QuizView::Active(quiz) => quiz,
            QuizView::NoQuestions => {
                println!("{}", render_no_questions());
                let _ = prompt.ask("").await?;
                self.session.return_to_start();
                return Ok(RunOutcome::Abandoned);
            }
        };

        let questions: Vec<Question> = quiz.questions().iter().cloned().collect();
        for (index, question) in questions.iter().enumerate() {
            if !Self::choose_option(prompt, index, question, quiz).await? {
                return Ok(RunOutcome::Abandoned);
            }
        }

        loop {
            if quiz.can_submit() && prompt.confirm("全部作答完毕，是否提交?", false).await? {
                break;
            }
            let Some(line) = prompt
                .ask(&format!("输入要修改的题号 (1-{}): ", questions.len()))
                .await?
            else {
                return Ok(RunOutcome::Abandoned);
            };
            match parse_choice(&line, questions.len()) {
                Some(index) => {
                    if !Self::choose_option(prompt, index, &questions[index], quiz).await? {
                        return Ok(RunOutcome::Abandoned);
                    }
                }
                None => println!("无效题号"),
            }
        }

        let score = quiz.submit()?;
        print!("{}", render_results(quiz));
        log_score(&score);
        Ok(RunOutcome::Graded)
    }

    /// 展示一道题并读取选项，输入结束时返回 `false`
    async fn choose_option<R: AsyncBufRead + Unpin>(
        prompt: &mut Prompt<R>,
        index: usize,
        question: &Question,
        quiz: &mut QuizSessionController,
    ) -> Result<bool> {
        print!("{}", render_question(index, question, quiz));
        loop {
            let Some(line) = prompt.ask("请选择选项编号: ").await? else {
                return Ok(false);
            };
            match parse_choice(&line, question.options.len()) {
                Some(choice) => {
                    quiz.select_option(&question.id, &question.options[choice])?;
                    return Ok(true);
                }
                None => println!("无效输入，请输入 1-{}", question.options.len()),
            }
        }
    }
}
