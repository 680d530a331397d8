use thiserror::Error;

/// 网络错误时的通用提示
pub const GENERIC_NETWORK_MESSAGE: &str = "Network error, please try again";
/// 服务端错误时的通用提示
pub const GENERIC_SERVICE_MESSAGE: &str = "An error occurred";

/// 应用程序错误类型
///
/// 所有错误都在编排层被转换为 `RequestState::Error` 中的一条消息，
/// 展示层只看到 [`AppError::user_message`] 的结果。
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入中没有可识别的课程代码
    #[error("输入校验失败: {0}")]
    Validation(#[from] ValidationError),

    /// 传输层失败（超时、连接失败）
    #[error("网络请求失败 ({endpoint}): {message}")]
    Network {
        endpoint: String,
        message: String,
        timed_out: bool,
    },

    /// 非 2xx 响应
    #[error("服务返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    Service {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },

    /// 2xx 响应但内容无法解析
    #[error("响应解析失败 ({endpoint}): {message}")]
    Decode { endpoint: String, message: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no course code found")]
    NoCourseCode,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值无效
    #[error("配置项 {field} 无效: {reason}")]
    InvalidValue { field: String, reason: String },

    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 由 reqwest 传输错误创建网络错误
    pub fn network(endpoint: impl Into<String>, err: &reqwest::Error, timeout_secs: u64) -> Self {
        let timed_out = err.is_timeout();
        let message = if timed_out {
            format!("Request timed out after {}s", timeout_secs)
        } else {
            err.to_string()
        };
        AppError::Network {
            endpoint: endpoint.into(),
            message,
            timed_out,
        }
    }

    /// 由非 2xx 响应创建服务错误，尽量从响应体中提取消息
    pub fn service(endpoint: impl Into<String>, status: u16, body: &str) -> Self {
        AppError::Service {
            endpoint: endpoint.into(),
            status,
            message: extract_error_message(body),
        }
    }

    pub fn decode(endpoint: impl Into<String>, err: impl std::fmt::Display) -> Self {
        AppError::Decode {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => {
                "Please enter a valid course code (e.g., CIS 5500)".to_string()
            }
            AppError::Network { message, .. } => {
                if message.trim().is_empty() {
                    GENERIC_NETWORK_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            AppError::Service { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_SERVICE_MESSAGE.to_string()),
            AppError::Decode { .. } => "Unexpected response from the course service".to_string(),
            AppError::Config(e) => e.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Network { timed_out: true, .. })
    }
}

/// 从错误响应体中提取消息（`detail` / `message` / `error` 字段）
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
