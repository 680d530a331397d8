//! # Course Picker
//!
//! 输入一句关于课程的问题，解析出课程代码，查询课程信息和社区评论，
//! 再请求课程分析（概要、先修要求、难度、建议）。
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - `CourseIdentifier`、`CourseRecord`、`Comment`、`InsightReport`、`Section`
//!
//! ### ② 业务能力层（Services）
//! - `services/course_code` - 从任意文本中提取课程代码
//! - `services/segmenter` - 把 `1. **标题**: 内容` 形式的文本切分为小节
//!
//! ### ③ 客户端层（Clients）
//! - `clients/` - `CourseApi` trait 与基于 reqwest 的实现
//!
//! ### ④ 流程层（Workflow）
//! - `SubmissionCtx` - 上下文封装（提交序号 + 问题 + 课程代码）
//! - `LookupFlow` - 流程编排（课程查询 → 课程分析）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `RequestOrchestrator` - 持有唯一的 `RequestState`，通过 `watch` 通道发布
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{CourseApi, HttpCourseClient};
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use models::{Comment, CourseIdentifier, CourseRecord, InsightReport, Section};
pub use orchestrator::{RequestOrchestrator, RequestState, StateSnapshot};
pub use services::{extract_course_code, segment_sections};
pub use workflow::{FlowOutcome, LookupFlow, SubmissionCtx};
