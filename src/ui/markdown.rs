//! Markdown to ratatui styled text converter
//!
//! The critics write loosely structured markdown: headers, bullets,
//! SHOUTING section labels ("KILL SIGNAL:"), inline bold and code. This
//! converts what it recognizes and passes everything else through as
//! plain text. Conversion never fails; the worst case is the raw line,
//! unstyled.

use super::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Parse markdown text and convert to styled Lines.
pub fn parse_markdown(text: &str, max_width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            lines.push(Line::from(""));
        } else if let Some(content) = line.strip_prefix("# ") {
            lines.push(header_line(content, Theme::WHITE));
        } else if let Some(content) = line.strip_prefix("## ") {
            lines.push(header_line(content, Theme::GREY_100));
        } else if let Some(content) = line.strip_prefix("### ") {
            lines.push(header_line(content, Theme::GREY_200));
        } else if let Some(content) = line
            .trim_start()
            .strip_prefix("- ")
            .or_else(|| line.trim_start().strip_prefix("* "))
            .or_else(|| line.trim_start().strip_prefix("• "))
        {
            push_bulleted(&mut lines, content, max_width);
        } else if let Some((number, content)) = split_numbered(line.trim_start()) {
            push_numbered(&mut lines, &number, content, max_width);
        } else if is_section_label(line) {
            lines.push(header_line(line.trim(), Theme::GREY_50));
        } else {
            lines.extend(wrap_and_parse_inline(line, max_width));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

fn header_line(text: &str, color: ratatui::style::Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Critic output uses ALL-CAPS labels like "PRIMARY FAILURE MODE:".
fn is_section_label(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 4
        && trimmed.ends_with(':')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || " :()-/&".contains(c))
        && trimmed.chars().any(|c| c.is_ascii_uppercase())
}

/// "1) foo" / "2. foo" → ("1)", "foo")
fn split_numbered(line: &str) -> Option<(String, &str)> {
    for sep in [". ", ") "] {
        if let Some(idx) = line.find(sep) {
            if idx > 0 && line[..idx].chars().all(|c| c.is_ascii_digit()) {
                let number = format!("{}{}", &line[..idx], sep.trim_end());
                return Some((number, &line[idx + sep.len()..]));
            }
        }
    }
    None
}

fn push_bulleted(lines: &mut Vec<Line<'static>>, content: &str, max_width: usize) {
    let wrapped = wrap_and_parse_inline(content, max_width.saturating_sub(4));
    for (i, styled) in wrapped.into_iter().enumerate() {
        let prefix = if i == 0 { "  • " } else { "    " };
        let mut spans = vec![Span::styled(prefix, Style::default().fg(Theme::GREY_400))];
        spans.extend(styled.spans);
        lines.push(Line::from(spans));
    }
}

fn push_numbered(lines: &mut Vec<Line<'static>>, number: &str, content: &str, max_width: usize) {
    let wrapped = wrap_and_parse_inline(content, max_width.saturating_sub(6));
    for (i, styled) in wrapped.into_iter().enumerate() {
        let prefix = if i == 0 {
            format!("  {} ", number)
        } else {
            " ".repeat(number.len() + 3)
        };
        let mut spans = vec![Span::styled(prefix, Style::default().fg(Theme::GREY_400))];
        spans.extend(styled.spans);
        lines.push(Line::from(spans));
    }
}

fn wrap_and_parse_inline(text: &str, max_width: usize) -> Vec<Line<'static>> {
    wrap_text(text, max_width)
        .into_iter()
        .map(|line| parse_inline(&line))
        .collect()
}

/// Greedy word wrap using Unicode display width.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(current);
            current = word.to_string();
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Inline markdown: **bold**, `code`. Unpaired markers fall through as
/// plain text.
fn parse_inline(text: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    let mut plain = String::new();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::styled(
                std::mem::take(plain),
                Style::default().fg(Theme::GREY_100),
            ));
        }
    };

    while i < chars.len() {
        if i + 1 < chars.len() && chars[i] == '*' && chars[i + 1] == '*' {
            let start = i + 2;
            let mut j = start;
            while j + 1 < chars.len() && !(chars[j] == '*' && chars[j + 1] == '*') {
                j += 1;
            }
            if j + 1 < chars.len() {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(
                    chars[start..j].iter().collect::<String>(),
                    Style::default()
                        .fg(Theme::WHITE)
                        .add_modifier(Modifier::BOLD),
                ));
                i = j + 2;
                continue;
            }
        }

        if chars[i] == '`' {
            if let Some(close) = chars[i + 1..].iter().position(|c| *c == '`') {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(
                    chars[i + 1..i + 1 + close].iter().collect::<String>(),
                    Style::default()
                        .fg(Theme::GREY_200)
                        .add_modifier(Modifier::BOLD),
                ));
                i += close + 2;
                continue;
            }
        }

        plain.push(chars[i]);
        i += 1;
    }

    flush(&mut plain, &mut spans);
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn headers_are_single_lines() {
        assert_eq!(parse_markdown("# Verdict", 80).len(), 1);
        assert_eq!(parse_markdown("## MOAT", 80).len(), 1);
    }

    #[test]
    fn caps_labels_are_recognized() {
        assert!(is_section_label("PRIMARY FAILURE MODE:"));
        assert!(is_section_label("KILL QUESTION:"));
        assert!(is_section_label("48-HOUR VALIDATION EXPERIMENT:"));
        assert!(!is_section_label("Not a label:"));
        assert!(!is_section_label("plain sentence"));
    }

    #[test]
    fn bullets_get_a_prefix() {
        let lines = parse_markdown("- first\n- second", 80);
        assert_eq!(lines.len(), 2);
        assert!(flatten(&lines).contains("• first"));
    }

    #[test]
    fn numbered_lists_keep_their_numbers() {
        let lines = parse_markdown("1) Users own plants\n2) They forget", 80);
        let text = flatten(&lines);
        assert!(text.contains("1) Users own plants"));
        assert!(text.contains("2) They forget"));
    }

    #[test]
    fn long_lines_wrap_at_width() {
        let text = "word ".repeat(40);
        let lines = parse_markdown(&text, 20);
        assert!(lines.len() > 1);
    }

    #[test]
    fn bold_and_code_are_styled() {
        let line = parse_inline("a **bold** and `code` mix");
        assert!(line.spans.len() >= 4);
    }

    #[test]
    fn unpaired_markers_pass_through() {
        let line = parse_inline("a ** dangling `tick");
        assert_eq!(
            line.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>(),
            "a ** dangling `tick"
        );
    }

    #[test]
    fn arbitrary_text_never_panics_and_survives() {
        for text in ["", "***", "``", "#", "- ", "1. ", "🌱 ünïcode **", "\n\n\n"] {
            let lines = parse_markdown(text, 10);
            assert!(!lines.is_empty());
        }
    }

    #[test]
    fn zero_width_passes_text_through() {
        let lines = parse_markdown("unwrappable", 0);
        assert_eq!(flatten(&lines), "unwrappable");
    }
}
