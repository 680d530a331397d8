//! 课程查询流程 - 流程层
//!
//! 核心职责：定义"一次提交"的两阶段请求顺序
//!
//! 流程顺序：
//! 1. 按课程代码查询课程信息
//! 2. 查询成功后，带上原始问题、课程信息和评论请求分析
//!
//! 查询失败时不会发出分析请求；不做自动重试，也不缓存结果。

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::CourseApi;
use crate::error::AppError;
use crate::models::{AnalyzeRequest, CourseRecord, InsightReport};
use crate::utils::logging::truncate_text;
use crate::workflow::submission_ctx::SubmissionCtx;

/// 流程结果
#[derive(Debug)]
pub enum FlowOutcome {
    /// 课程查询失败，未发出分析请求
    LookupFailed(AppError),
    /// 课程查询成功，分析失败
    AnalysisFailed { course: CourseRecord, error: AppError },
    /// 两个请求都成功
    Completed {
        course: CourseRecord,
        insight: InsightReport,
    },
}

/// 课程查询流程
///
/// - 只编排请求顺序，不持有状态
/// - 状态的发布由编排层负责
pub struct LookupFlow {
    api: Arc<dyn CourseApi>,
}

impl LookupFlow {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    /// 执行两阶段请求
    ///
    /// `on_course` 在课程信息到达、分析请求发出之前调用，
    /// 让调用方可以先展示课程信息。
    pub async fn run<F>(&self, ctx: &SubmissionCtx, on_course: F) -> FlowOutcome
    where
        F: FnOnce(&CourseRecord) + Send,
    {
        info!("{} 🔍 查询课程信息...", ctx);

        let course = match self.api.fetch_course(&ctx.course_code).await {
            Ok(course) => course,
            Err(e) => {
                warn!("{} {} 课程查询失败: {}", ctx, failure_icon(&e), e);
                return FlowOutcome::LookupFailed(e);
            }
        };

        info!(
            "{} ✓ 课程查询完成: {} (评论 {} 条)",
            ctx,
            course.title,
            course.comments.len()
        );
        on_course(&course);

        info!("{} 🤖 请求课程分析: {}", ctx, truncate_text(&ctx.query, 80));

        let request = AnalyzeRequest::new(&ctx.query, &course);
        let result = self.api.analyze(&request).await;

        match result {
            Ok(insight) => {
                info!(
                    "{} ✓ 课程分析完成，建议 {} 条",
                    ctx,
                    insight.recommendations.len()
                );
                FlowOutcome::Completed { course, insight }
            }
            Err(error) => {
                warn!("{} {} 课程分析失败: {}", ctx, failure_icon(&error), error);
                FlowOutcome::AnalysisFailed { course, error }
            }
        }
    }
}

/// 超时和其他失败在日志里用不同的标记区分
fn failure_icon(err: &AppError) -> &'static str {
    if err.is_timeout() {
        "⏱️"
    } else {
        "⚠️"
    }
}
