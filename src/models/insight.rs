use serde::{Deserialize, Serialize};

use crate::models::{Comment, CourseRecord, Section};
use crate::services::segmenter::segment_sections;

/// 课程分析结果
///
/// 三个叙述字段都是原始文本，展示前交给分段器处理。
/// 缺失字段使用与服务端一致的占位文本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default = "default_prerequisites_analysis")]
    pub prerequisites_analysis: String,
    #[serde(default = "default_difficulty_assessment")]
    pub difficulty_assessment: String,
    #[serde(default = "default_recommendations")]
    pub recommendations: Vec<String>,
}

impl InsightReport {
    pub fn summary_sections(&self) -> Vec<Section> {
        segment_sections(&self.summary)
    }

    pub fn prerequisites_analysis_sections(&self) -> Vec<Section> {
        segment_sections(&self.prerequisites_analysis)
    }

    pub fn difficulty_assessment_sections(&self) -> Vec<Section> {
        segment_sections(&self.difficulty_assessment)
    }
}

fn default_summary() -> String {
    "No summary available".to_string()
}

fn default_prerequisites_analysis() -> String {
    "No prerequisites analysis available".to_string()
}

fn default_difficulty_assessment() -> String {
    "No difficulty assessment available".to_string()
}

fn default_recommendations() -> Vec<String> {
    vec!["No specific recommendations available".to_string()]
}

/// `POST /api/planning/analyze` 的请求体
///
/// 一次请求携带完整上下文：原始问题、课程信息、评论列表。
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub query: &'a str,
    pub course_info: &'a CourseRecord,
    pub reddit_comments: &'a [Comment],
}

impl<'a> AnalyzeRequest<'a> {
    pub fn new(query: &'a str, course: &'a CourseRecord) -> Self {
        Self {
            query,
            course_info: course,
            reddit_comments: &course.comments,
        }
    }
}
