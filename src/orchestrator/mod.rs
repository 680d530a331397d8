//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有唯一的请求状态 [`RequestState`]，驱动每次提交的完整生命周期，
//! 并通过 `watch` 通道把状态变化发布给展示层。
//!
//! ## 层次关系
//!
//! ```text
//! request_orchestrator (submit → 状态迁移)
//!     ↓
//! workflow::LookupFlow (课程查询 → 课程分析)
//!     ↓
//! clients::CourseApi (HTTP 调用)
//! ```
//!
//! ## 状态机
//!
//! `Idle → Loading → (Success | Error)`，任意一次新提交都回到 `Loading`。
//! 每次提交分配一个递增序号，过期提交的结果会被丢弃（可配置关闭）。

pub mod request_orchestrator;
pub mod request_state;

pub use request_orchestrator::RequestOrchestrator;
pub use request_state::{RequestState, StateSnapshot};
