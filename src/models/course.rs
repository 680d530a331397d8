use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::Section;
use crate::services::segmenter::segment_sections;

/// 规范化的课程代码，例如 `CIS 5500`
///
/// 只能通过 [`crate::services::course_code::extract_course_code`] 或
/// [`CourseIdentifier::new`] 构造，院系代码总是大写。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseIdentifier {
    department: String,
    number: String,
}

impl CourseIdentifier {
    /// 由院系代码和四位课程号创建（院系代码会被转为大写）
    pub fn new(department: &str, number: &str) -> Self {
        Self {
            department: department.to_ascii_uppercase(),
            number: number.to_string(),
        }
    }

    /// 不带空格的形式，例如 `CIS5500`
    pub fn compact(&self) -> String {
        format!("{}{}", self.department, self.number)
    }
}

impl fmt::Display for CourseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.department, self.number)
    }
}

/// 课程评论（来自社区讨论）
///
/// 顺序由服务端决定，客户端不重新排序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    /// Unix 时间戳（秒），缺失时为 0
    #[serde(
        rename = "created_utc",
        default,
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: i64,
}

impl Comment {
    /// 以本地日期显示发布时间，时间戳无效时返回 `None`
    pub fn posted_date(&self) -> Option<String> {
        Local
            .timestamp_opt(self.created_at, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }
}

/// 课程信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 没有先修要求时为 `None`
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(
        rename = "reddit_comments",
        default,
        deserialize_with = "deserialize_null_as_empty"
    )]
    pub comments: Vec<Comment>,
    /// 服务端返回的其他字段，分析请求时原样带回
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseRecord {
    /// 把先修要求切分为可展示的小节
    pub fn prerequisite_sections(&self) -> Vec<Section> {
        self.prerequisites
            .as_deref()
            .map(segment_sections)
            .unwrap_or_default()
    }
}

// 服务端可能返回浮点数时间戳
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;

    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or float unix timestamp")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            i64::try_from(value).map_err(|_| E::custom("timestamp out of range"))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trunc() as i64)
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}

fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_display_and_compact() {
        let code = CourseIdentifier::new("cis", "5500");
        assert_eq!(code.to_string(), "CIS 5500");
        assert_eq!(code.compact(), "CIS5500");
        assert_eq!(code, CourseIdentifier::new("CIS", "5500"));
    }

    #[test]
    fn test_course_record_from_server_json() {
        let record: CourseRecord = serde_json::from_value(json!({
            "course_code": "CIS 5500",
            "title": "Software Systems",
            "description": "Databases and more",
            "prerequisites": null,
            "reddit_comments": [
                {"author": "a", "body": "hard", "score": -3, "created_utc": 1700000000.0},
                {"author": "b", "body": "fun", "score": 12, "created_utc": 1600000000}
            ],
            "data_freshness": {"needs_update": false}
        }))
        .unwrap();

        assert!(record.prerequisites.is_none());
        assert!(record.prerequisite_sections().is_empty());
        assert_eq!(record.comments.len(), 2);
        // 保持服务端顺序
        assert_eq!(record.comments[0].author, "a");
        assert_eq!(record.comments[0].score, -3);
        assert_eq!(record.comments[0].created_at, 1_700_000_000);
        assert_eq!(record.comments[1].created_at, 1_600_000_000);
    }

    #[test]
    fn test_comment_without_timestamp() {
        let record: CourseRecord = serde_json::from_value(json!({
            "course_code": "CIS 5500",
            "title": "Software Systems",
            "reddit_comments": [
                {"author": "a", "body": "no date", "score": 2},
                {"author": "b", "body": "dated", "score": 1, "created_utc": 1600000000}
            ]
        }))
        .unwrap();
        assert_eq!(record.comments.len(), 2);
        assert_eq!(record.comments[0].created_at, 0);
        assert_eq!(record.comments[0].body, "no date");
        assert_eq!(record.comments[1].created_at, 1_600_000_000);
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let record: CourseRecord = serde_json::from_value(json!({
            "course_code": "CIS 5500",
            "title": "Software Systems",
            "description": "",
            "last_updated": "2024-01-01T00:00:00",
            "data_freshness": {"needs_update": false}
        }))
        .unwrap();
        assert_eq!(record.extra["last_updated"], "2024-01-01T00:00:00");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["data_freshness"]["needs_update"], false);
        assert_eq!(value["last_updated"], "2024-01-01T00:00:00");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_null_comments_become_empty() {
        let record: CourseRecord = serde_json::from_value(json!({
            "course_code": "5500",
            "title": "Software Systems",
            "description": "",
            "reddit_comments": null
        }))
        .unwrap();
        assert!(record.comments.is_empty());
    }

    #[test]
    fn test_comments_serialize_with_wire_names() {
        let comment = Comment {
            author: "a".to_string(),
            body: "b".to_string(),
            score: 1,
            created_at: 42,
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["created_utc"], 42);
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_posted_date() {
        let comment = Comment {
            author: String::new(),
            body: String::new(),
            score: 0,
            created_at: 1_700_000_000,
        };
        let date = comment.posted_date().unwrap();
        assert!(date.starts_with("2023-11-1"));
    }
}
