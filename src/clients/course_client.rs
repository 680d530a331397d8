/// 课程服务 API 客户端
///
/// 封装 `GET /api/courses/{course_code}` 与 `POST /api/planning/analyze` 两个调用
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{AnalyzeRequest, CourseIdentifier, CourseRecord, InsightReport};
use crate::utils::logging::truncate_text;

/// 课程服务接口
///
/// 编排层只依赖这个 trait，测试时可以替换为内存实现。
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// 按课程代码查询课程信息
    async fn fetch_course(&self, code: &CourseIdentifier) -> AppResult<CourseRecord>;

    /// 请求课程分析
    async fn analyze(&self, request: &AnalyzeRequest<'_>) -> AppResult<InsightReport>;
}

/// 基于 reqwest 的课程服务客户端
pub struct HttpCourseClient {
    http: Client,
    base_url: Url,
    timeout_secs: u64,
    compact_course_path: bool,
}

impl HttpCourseClient {
    /// 创建新的客户端，两次调用共用同一个超时设置
    pub fn new(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.api_base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_base_url".to_string(),
            reason: e.to_string(),
        })?;
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "http_client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            timeout_secs: config.request_timeout_secs,
            compact_course_path: config.compact_course_path,
        })
    }

    /// 拼接接口地址，每个路径段都会被百分号编码
    fn endpoint_url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                reason: format!("'{}' 不能作为基础地址", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn course_path_segment(&self, code: &CourseIdentifier) -> String {
        if self.compact_course_path {
            code.compact()
        } else {
            code.to_string()
        }
    }

    /// 读取响应：非 2xx 转为服务错误，2xx 解析为目标类型
    async fn read_json<T: DeserializeOwned>(&self, endpoint: &str, response: Response) -> AppResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(endpoint, &e, self.timeout_secs))?;

        debug!("{} 响应 {}: {}", endpoint, status, truncate_text(&body, 200));

        if !status.is_success() {
            warn!("{} 返回错误状态 {}", endpoint, status);
            return Err(AppError::service(endpoint, status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| AppError::decode(endpoint, e))
    }
}

#[async_trait]
impl CourseApi for HttpCourseClient {
    async fn fetch_course(&self, code: &CourseIdentifier) -> AppResult<CourseRecord> {
        let segment = self.course_path_segment(code);
        let endpoint = format!("GET /api/courses/{}", segment);
        let url = self.endpoint_url(&["api", "courses", &segment])?;

        debug!("查询课程: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::network(&endpoint, &e, self.timeout_secs))?;

        self.read_json(&endpoint, response).await
    }

    async fn analyze(&self, request: &AnalyzeRequest<'_>) -> AppResult<InsightReport> {
        let endpoint = "POST /api/planning/analyze";
        let url = self.endpoint_url(&["api", "planning", "analyze"])?;

        debug!(
            "请求课程分析: {} (评论 {} 条)",
            url,
            request.reddit_comments.len()
        );

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::network(endpoint, &e, self.timeout_secs))?;

        self.read_json(endpoint, response).await
    }
}
