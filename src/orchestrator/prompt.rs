//! 终端输入

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// 逐行读取用户输入
pub struct Prompt<R> {
    lines: Lines<R>,
}

impl Prompt<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// 打印提示并读取一行，输入结束时返回 `None`
    pub async fn ask(&mut self, message: &str) -> Result<Option<String>> {
        print!("{}", message);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// 是/否确认，空输入取默认值，输入结束视为否
    pub async fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let Some(line) = self.ask(&format!("{} {} ", message, hint)).await? else {
            return Ok(false);
        };
        Ok(match line.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}
