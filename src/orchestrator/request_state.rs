use crate::models::{CourseRecord, InsightReport};

/// 请求生命周期状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    /// 请求进行中；课程信息到达后会先放在这里
    Loading { course: Option<CourseRecord> },
    Success {
        course: CourseRecord,
        insight: InsightReport,
    },
    /// `course` 仅在分析失败且配置为保留课程信息时存在
    Error {
        message: String,
        course: Option<CourseRecord>,
    },
}

impl RequestState {
    pub fn error(message: impl Into<String>) -> Self {
        RequestState::Error {
            message: message.into(),
            course: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    /// 是否处于终态（成功或失败）
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Success { .. } | RequestState::Error { .. })
    }

    /// 当前可展示的课程信息
    pub fn course(&self) -> Option<&CourseRecord> {
        match self {
            RequestState::Idle => None,
            RequestState::Loading { course } | RequestState::Error { course, .. } => course.as_ref(),
            RequestState::Success { course, .. } => Some(course),
        }
    }

    pub fn insight(&self) -> Option<&InsightReport> {
        match self {
            RequestState::Success { insight, .. } => Some(insight),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// 发布给订阅者的状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    /// 最近一次提交的序号，未提交过时为 0
    pub submission: u64,
    pub state: RequestState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(RequestState::default(), RequestState::Idle);
        assert!(!RequestState::Idle.is_terminal());
        assert!(RequestState::Loading { course: None }.is_loading());

        let err = RequestState::error("boom");
        assert!(err.is_terminal());
        assert_eq!(err.error_message(), Some("boom"));
        assert!(err.course().is_none());
        assert!(err.insight().is_none());
    }
}
