//! 课程代码提取 - 业务能力层
//!
//! 从任意文本中找出第一个 `院系代码 + 四位数字` 组合

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::models::CourseIdentifier;

static COURSE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]{2,4})\s*([0-9]{4})").expect("课程代码正则无效")
});

/// 提取课程代码
///
/// 只使用第一个匹配，其余内容丢弃。院系代码转为大写，
/// 与数字之间固定一个空格。
///
/// # 示例
/// ```
/// # use course_picker::services::extract_course_code;
/// let code = extract_course_code("what do i need before cis5500").unwrap();
/// assert_eq!(code.to_string(), "CIS 5500");
/// ```
pub fn extract_course_code(query: &str) -> Result<CourseIdentifier, ValidationError> {
    let caps = COURSE_CODE_REGEX
        .captures(query)
        .ok_or(ValidationError::NoCourseCode)?;
    Ok(CourseIdentifier::new(&caps[1], &caps[2]))
}
