use serde::Serialize;

/// 从叙述文本中切分出的带标题小节
///
/// 每次渲染时重新计算，不缓存。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 没有 `**:` 分隔符时为空字符串
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}
