//! 脚本解析器
//!
//! 将模型生成的对话文本解析为有序的 (说话人, 文本) 片段
//!
//! 解析规则：
//! 1. 逐行扫描，行首严格匹配 `Host:` / `Guest:`（区分大小写）
//! 2. 标签行结束上一段并开启新段，冒号后的内容作为新段开头
//! 3. 非标签行连同换行追加到当前段（支持多行发言）
//! 4. 第一个标签之前的前言丢弃，空白片段丢弃
//! 5. 相邻的同一说话人标签各自成段，不合并

use super::{Segment, Speaker};

/// 单行分类结果
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// 标签行，rest 为冒号之后的文本
    Label { speaker: Speaker, rest: &'a str },
    /// 普通文本行
    Text(&'a str),
}

/// 解析状态
#[derive(Debug)]
enum ParserState {
    /// 尚未遇到任何标签
    Idle,
    /// 正在为某个说话人累积文本
    Accumulating { speaker: Speaker, buffer: String },
}

/// 对一行进行分类
#[inline]
fn classify_line(line: &str) -> LineKind<'_> {
    for speaker in Speaker::ALL {
        if let Some(rest) = line
            .strip_prefix(speaker.label())
            .and_then(|r| r.strip_prefix(':'))
        {
            return LineKind::Label {
                speaker,
                rest: rest.trim_start(),
            };
        }
    }
    LineKind::Text(line)
}

/// 结束当前累积，非空白时产出片段
fn flush(state: ParserState, segments: &mut Vec<Segment>) {
    if let ParserState::Accumulating { speaker, buffer } = state {
        // Segment::new 负责 trim 与空白过滤
        if let Ok(segment) = Segment::new(speaker, buffer) {
            segments.push(segment);
        }
    }
}

/// 解析对话脚本
///
/// 永不失败：没有任何可识别标签时返回空序列，由调用方决定如何处理
pub fn parse_script(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut state = ParserState::Idle;

    for line in text.lines() {
        state = match (classify_line(line), state) {
            (LineKind::Label { speaker, rest }, previous) => {
                flush(previous, &mut segments);
                ParserState::Accumulating {
                    speaker,
                    buffer: rest.to_string(),
                }
            }
            (LineKind::Text(_), ParserState::Idle) => ParserState::Idle,
            (LineKind::Text(line), ParserState::Accumulating { speaker, mut buffer }) => {
                buffer.push('\n');
                buffer.push_str(line);
                ParserState::Accumulating { speaker, buffer }
            }
        };
    }

    flush(state, &mut segments);
    segments
}

/// 将片段重新拼接为脚本文本（每段一行或多行）
pub fn render_script(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_script_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(speaker: Speaker, text: &str) -> Segment {
        Segment::new(speaker, text).unwrap()
    }

    #[test]
    fn test_two_speakers() {
        let text = "Host: Welcome to the show.\nGuest: Thanks for having me.\n";
        assert_eq!(
            parse_script(text),
            vec![
                seg(Speaker::Host, "Welcome to the show."),
                seg(Speaker::Guest, "Thanks for having me."),
            ]
        );
    }

    #[test]
    fn test_preamble_discarded() {
        let text = "Some preamble text\nHost: Hello there.\n";
        assert_eq!(parse_script(text), vec![seg(Speaker::Host, "Hello there.")]);
    }

    #[test]
    fn test_multiline_turn() {
        let text = "Host: Line one\ncontinued here.\nGuest: Reply.";
        assert_eq!(
            parse_script(text),
            vec![
                seg(Speaker::Host, "Line one\ncontinued here."),
                seg(Speaker::Guest, "Reply."),
            ]
        );
    }

    #[test]
    fn test_no_labels_yields_empty() {
        assert!(parse_script("Just some prose.\nNo dialogue at all.").is_empty());
        assert!(parse_script("").is_empty());
    }

    #[test]
    fn test_label_is_case_sensitive_and_anchored() {
        // 小写标签和非行首标签都不算
        let text = "host: lower case\n  Host: indented\nGuest: real one";
        assert_eq!(parse_script(text), vec![seg(Speaker::Guest, "real one")]);
    }

    #[test]
    fn test_consecutive_same_speaker_not_merged() {
        let text = "Host: First part.\nHost: Second part.\nGuest: Okay.";
        let segments = parse_script(text);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], seg(Speaker::Host, "First part."));
        assert_eq!(segments[1], seg(Speaker::Host, "Second part."));
    }

    #[test]
    fn test_whitespace_only_dialogue_dropped() {
        let text = "Host:   \nGuest: Still here.\nHost:\n\n";
        assert_eq!(parse_script(text), vec![seg(Speaker::Guest, "Still here.")]);
    }

    #[test]
    fn test_empty_label_filled_by_continuation() {
        let text = "Host:\nThe text comes on the next line.";
        assert_eq!(
            parse_script(text),
            vec![seg(Speaker::Host, "The text comes on the next line.")]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "Host: One.\r\nGuest: Two.\r\n";
        assert_eq!(
            parse_script(text),
            vec![seg(Speaker::Host, "One."), seg(Speaker::Guest, "Two.")]
        );
    }

    #[test]
    fn test_n_labeled_lines_yield_n_segments() {
        let lines: Vec<String> = (0..12)
            .map(|i| {
                let label = if i % 2 == 0 { "Host" } else { "Guest" };
                format!("{}: line number {}", label, i)
            })
            .collect();
        let segments = parse_script(&lines.join("\n"));

        assert_eq!(segments.len(), 12);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.text, format!("line number {}", i));
            let expected = if i % 2 == 0 { Speaker::Host } else { Speaker::Guest };
            assert_eq!(segment.speaker, expected);
        }
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let text = "Intro words\nHost: Hi!\nThis continues.\n\nGuest: Hello.\nHost: Bye.";
        let first = parse_script(text);
        let second = parse_script(&render_script(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn test_label_without_space_after_colon() {
        assert_eq!(parse_script("Guest:tight"), vec![seg(Speaker::Guest, "tight")]);
    }
}
