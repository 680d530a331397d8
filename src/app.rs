//! 终端前端
//!
//! 读取问题、提交给编排器、把状态渲染为纯文本。

use anyhow::Result;
use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::clients::{CourseApi, HttpCourseClient};
use crate::config::Config;
use crate::models::{CourseRecord, InsightReport, Section};
use crate::orchestrator::{RequestOrchestrator, RequestState};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    orchestrator: Arc<RequestOrchestrator>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let client = HttpCourseClient::new(&config)?;
        Ok(Self::with_api(Arc::new(client), &config))
    }

    /// 使用指定的课程服务创建应用
    pub fn with_api(api: Arc<dyn CourseApi>, config: &Config) -> Self {
        Self {
            orchestrator: Arc::new(RequestOrchestrator::new(api, config)),
        }
    }

    /// 运行应用
    ///
    /// 有命令行参数时只处理这一个问题；否则逐行读取标准输入。
    pub async fn run(&self, query: Option<String>) -> Result<()> {
        let mut stdout = std::io::stdout();

        if let Some(query) = query {
            let state = self.orchestrator.submit(&query).await;
            writeln!(stdout, "{}", render_state(&state))?;
            return Ok(());
        }

        writeln!(
            stdout,
            "Ask about a course (e.g. \"What do I need before CIS 5500?\"), or type quit."
        )?;
        self.run_lines(BufReader::new(tokio::io::stdin()), &mut stdout)
            .await
    }

    /// 逐行处理输入
    ///
    /// 每行作为一次新的提交，不等待上一次完成；每次状态变化都重新渲染。
    /// 输入结束（或读到 quit）后等待所有进行中的提交完成再返回。
    pub async fn run_lines<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: std::io::Write,
    {
        let mut rx = self.orchestrator.subscribe();
        let mut submissions = JoinSet::new();
        let mut lines = input.lines();
        let mut reading = true;

        while reading || !submissions.is_empty() {
            tokio::select! {
                line = lines.next_line(), if reading => match line? {
                    Some(line) => {
                        let line = line.trim().to_string();
                        if is_quit(&line) {
                            reading = false;
                        } else if !line.is_empty() {
                            let orchestrator = self.orchestrator.clone();
                            submissions.spawn(async move { orchestrator.submit(&line).await });
                        }
                    }
                    None => reading = false,
                },
                Ok(()) = rx.changed() => {
                    let rendered = render_state(&rx.borrow_and_update().state);
                    writeln!(out, "{}", rendered)?;
                }
                Some(joined) = submissions.join_next() => {
                    if let Err(e) = joined {
                        warn!("提交任务异常结束: {}", e);
                    }
                }
                else => break,
            }
        }

        // 最后一次状态变化可能还没来得及渲染
        if rx.has_changed().unwrap_or(false) {
            let state = rx.borrow_and_update().state.clone();
            if state.is_terminal() {
                writeln!(out, "{}", render_state(&state))?;
            }
        }
        out.flush()?;

        info!("👋 已退出");
        Ok(())
    }
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// 把请求状态渲染为纯文本
pub fn render_state(state: &RequestState) -> String {
    let mut out = String::new();
    match state {
        RequestState::Idle => {}
        RequestState::Loading { course } => {
            match course {
                Some(course) => {
                    render_course(&mut out, course);
                    out.push_str("\n⏳ Analyzing...\n");
                }
                None => out.push_str("⏳ Searching...\n"),
            }
        }
        RequestState::Success { course, insight } => {
            render_course(&mut out, course);
            render_insight(&mut out, insight);
        }
        RequestState::Error { message, course } => {
            if let Some(course) = course {
                render_course(&mut out, course);
                out.push('\n');
            }
            let _ = writeln!(out, "❌ {}", message);
        }
    }
    out
}

fn render_course(out: &mut String, course: &CourseRecord) {
    let _ = writeln!(out, "== {}: {} ==", course.course_code, course.title);
    let _ = writeln!(out, "{}", course.description);

    let prerequisites = course.prerequisite_sections();
    if !prerequisites.is_empty() {
        out.push_str("\n-- Prerequisites --\n");
        render_sections(out, &prerequisites);
    }

    if !course.comments.is_empty() {
        out.push_str("\n-- Student Comments --\n");
        for comment in &course.comments {
            let _ = writeln!(
                out,
                "u/{} (Score: {}) {}",
                comment.author,
                comment.score,
                comment.posted_date().unwrap_or_default()
            );
            let _ = writeln!(out, "  {}", comment.body);
        }
    }
}

fn render_insight(out: &mut String, insight: &InsightReport) {
    out.push_str("\n-- Course Analysis --\n");
    render_sections(out, &insight.summary_sections());
    out.push_str("\n-- Prerequisites Analysis --\n");
    render_sections(out, &insight.prerequisites_analysis_sections());
    out.push_str("\n-- Difficulty Assessment --\n");
    render_sections(out, &insight.difficulty_assessment_sections());
    out.push_str("\n-- Recommendations --\n");
    for rec in &insight.recommendations {
        let _ = writeln!(out, "• {}", rec);
    }
}

fn render_sections(out: &mut String, sections: &[Section]) {
    for section in sections {
        if section.has_title() {
            let _ = writeln!(out, "[{}]", section.title);
        }
        let _ = writeln!(out, "{}", section.body);
    }
}
