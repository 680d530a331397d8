//! 结构化文本分段
//!
//! 把 `1. **标题**: 内容 2. **标题**: 内容` 形式的文本切分为小节列表。
//! 纯函数，不会失败；没有分隔符时退化为更少或无标题的小节。

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Section;

static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.\s+").expect("小节编号正则无效"));

static TITLE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*:\s*").expect("标题分隔符正则无效"));

/// 切分文本为小节
///
/// 1. 按 `数字. ` 切分，丢弃修剪后为空的片段
/// 2. 片段内按 `**:` 切分：前半为标题，其余用 `": "` 重新连接后作为正文
/// 3. 片段内没有 `**:` 时整段为正文，标题为空
pub fn segment_sections(text: &str) -> Vec<Section> {
    SECTION_MARKER
        .split(text)
        .filter(|piece| !piece.trim().is_empty())
        .map(parse_piece)
        .collect()
}

fn parse_piece(piece: &str) -> Section {
    let parts: Vec<&str> = TITLE_DELIMITER.split(piece).collect();
    match parts.split_first() {
        Some((title, rest)) if !rest.is_empty() => {
            Section::new(clean_title(title), rest.join(": ").trim())
        }
        _ => Section::new("", piece.trim()),
    }
}

// 标题前的 `**` 是粗体标记的开头
fn clean_title(raw: &str) -> &str {
    raw.trim().trim_start_matches("**").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_bold_sections() {
        let sections =
            segment_sections("1. **Math**: Calculus required. 2. **CS**: Intro programming.");
        assert_eq!(
            sections,
            vec![
                Section::new("Math", "Calculus required."),
                Section::new("CS", "Intro programming."),
            ]
        );
    }

    #[test]
    fn test_plain_text_becomes_untitled_section() {
        assert_eq!(
            segment_sections("Just a plain sentence."),
            vec![Section::new("", "Just a plain sentence.")]
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(segment_sections("").is_empty());
        assert!(segment_sections("   \n\t ").is_empty());
        assert!(segment_sections("1. 2. ").is_empty());
    }

    #[test]
    fn test_preamble_is_kept_when_not_empty() {
        let sections = segment_sections("Overview:\n1. **Math**: Linear algebra.");
        assert_eq!(
            sections,
            vec![
                Section::new("", "Overview:"),
                Section::new("Math", "Linear algebra."),
            ]
        );
    }

    #[test]
    fn test_extra_delimiters_rejoined_into_body() {
        let sections = segment_sections("1. **Tip**: Note**: start early");
        assert_eq!(sections, vec![Section::new("Tip", "Note: start early")]);
    }

    #[test]
    fn test_numbers_inside_body_do_not_split() {
        let sections = segment_sections("1. **Programming**: CIS 1200 required.");
        assert_eq!(sections, vec![Section::new("Programming", "CIS 1200 required.")]);

        let sections = segment_sections("1. **Load**: About 3.5 hours a week.");
        assert_eq!(sections, vec![Section::new("Load", "About 3.5 hours a week.")]);
    }

    #[test]
    fn test_multiline_markdown() {
        let text = "1. **Workload**:\n  Heavy projects.\n\n2. **Exams**:  Two midterms.\n";
        assert_eq!(
            segment_sections(text),
            vec![
                Section::new("Workload", "Heavy projects."),
                Section::new("Exams", "Two midterms."),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "1. **A**: x 2. y 3. **C**: z";
        assert_eq!(segment_sections(text), segment_sections(text));
        assert_eq!(segment_sections(text)[1], Section::new("", "y"));
    }
}
