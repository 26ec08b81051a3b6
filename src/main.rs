use std::path::PathBuf;

use anyhow::{Context, Result};
use pdf_quiz_client::{logger, App, Config, RunOutcome};
use tracing::info;

const CONFIG_FILE: &str = "quiz.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load(CONFIG_FILE).context("加载配置失败")?;

    // 初始化日志
    logger::init(config.verbose_logging);

    let pdf_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("用法: pdf_quiz_client <file.pdf>")?;

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    match app.run(&pdf_path).await? {
        RunOutcome::Graded => info!("👋 再见"),
        RunOutcome::Rejected => info!("文件未被接受，程序结束"),
        RunOutcome::Abandoned => info!("流程已放弃，程序结束"),
    }

    Ok(())
}
