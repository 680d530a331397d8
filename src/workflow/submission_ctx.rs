//! 提交上下文
//!
//! 封装"这是第几次提交、查的是哪门课"这一信息

use std::fmt::Display;

use crate::models::CourseIdentifier;

/// 单次提交的上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 提交序号（单调递增）
    pub seq: u64,

    /// 用户输入的原始问题，作为分析上下文原样转发
    pub query: String,

    /// 从问题中提取的课程代码
    pub course_code: CourseIdentifier,
}

impl SubmissionCtx {
    pub fn new(seq: u64, query: impl Into<String>, course_code: CourseIdentifier) -> Self {
        Self {
            seq,
            query: query.into(),
            course_code,
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[提交 #{} {}]", self.seq, self.course_code)
    }
}
