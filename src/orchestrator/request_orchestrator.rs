//! 请求编排器 - 编排层
//!
//! 对外只有一个操作 [`RequestOrchestrator::submit`]。
//! 校验失败不发出任何网络请求；查询失败不发出分析请求；
//! 所有错误都在这里转换为 `RequestState::Error`，不再向上传播。

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::clients::CourseApi;
use crate::config::Config;
use crate::error::AppError;
use crate::orchestrator::request_state::{RequestState, StateSnapshot};
use crate::services::extract_course_code;
use crate::workflow::{FlowOutcome, LookupFlow, SubmissionCtx};

/// 请求编排器
///
/// 状态只由编排器修改，展示层通过 [`subscribe`](Self::subscribe) 只读访问。
/// 可以放进 `Arc` 在多个任务中并发调用 `submit`。
pub struct RequestOrchestrator {
    flow: LookupFlow,
    state: watch::Sender<StateSnapshot>,
    discard_stale_responses: bool,
    retain_course_on_analysis_failure: bool,
}

impl RequestOrchestrator {
    pub fn new(api: Arc<dyn CourseApi>, config: &Config) -> Self {
        let (state, _) = watch::channel(StateSnapshot::default());
        Self {
            flow: LookupFlow::new(api),
            state,
            discard_stale_responses: config.discard_stale_responses,
            retain_course_on_analysis_failure: config.retain_course_on_analysis_failure,
        }
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.state.subscribe()
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.borrow().clone()
    }

    /// 提交一次查询
    ///
    /// 返回本次提交产生的终态。若本次提交已被更新的提交取代，
    /// 返回值不会被发布到状态通道。
    pub async fn submit(&self, query: &str) -> RequestState {
        let course_code = match extract_course_code(query) {
            Ok(code) => code,
            Err(e) => {
                let err = AppError::from(e);
                let state = RequestState::error(err.user_message());
                let seq = self.begin(state.clone());
                warn!("[提交 #{}] ⚠️ {}", seq, err);
                return state;
            }
        };

        let seq = self.begin(RequestState::Loading { course: None });
        let ctx = SubmissionCtx::new(seq, query, course_code);
        info!("{} 📤 开始处理", ctx);

        let outcome = self
            .flow
            .run(&ctx, |course| {
                self.apply(
                    &ctx,
                    RequestState::Loading {
                        course: Some(course.clone()),
                    },
                );
            })
            .await;

        let state = self.terminal_state(outcome);
        if self.apply(&ctx, state.clone()) {
            match &state {
                RequestState::Success { .. } => info!("{} ✅ 处理完成", ctx),
                _ => warn!("{} ❌ 处理失败", ctx),
            }
        }
        state
    }

    fn terminal_state(&self, outcome: FlowOutcome) -> RequestState {
        match outcome {
            FlowOutcome::Completed { course, insight } => RequestState::Success { course, insight },
            FlowOutcome::LookupFailed(e) => RequestState::error(e.user_message()),
            FlowOutcome::AnalysisFailed { course, error } => RequestState::Error {
                message: error.user_message(),
                course: self.retain_course_on_analysis_failure.then_some(course),
            },
        }
    }

    /// 开始新的提交：分配序号并无条件覆盖当前状态
    fn begin(&self, state: RequestState) -> u64 {
        let mut seq = 0;
        self.state.send_modify(|snapshot| {
            snapshot.submission += 1;
            snapshot.state = state;
            seq = snapshot.submission;
        });
        seq
    }

    /// 应用状态迁移，返回是否已发布
    ///
    /// 序号比较和写入在同一次加锁内完成。
    fn apply(&self, ctx: &SubmissionCtx, state: RequestState) -> bool {
        if !self.discard_stale_responses {
            self.state.send_modify(|snapshot| snapshot.state = state);
            return true;
        }

        let published = self.state.send_if_modified(|snapshot| {
            if snapshot.submission == ctx.seq {
                snapshot.state = state;
                true
            } else {
                false
            }
        });
        if !published {
            debug!("{} 已被更新的提交取代，丢弃结果", ctx);
        }
        published
    }
}
