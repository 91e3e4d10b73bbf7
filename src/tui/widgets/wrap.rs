//! Word wrapping for styled lines.
//!
//! The message list scrolls by wrapped row, so wrapping happens here rather
//! than inside `Paragraph`, where the row count is not observable.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap every line to `width` display columns.
pub fn wrap_lines(lines: &[Line<'static>], width: usize) -> Vec<Line<'static>> {
    lines.iter().flat_map(|line| wrap_line(line, width)).collect()
}

/// Wrap one line at word boundaries, splitting words that are wider than
/// the whole line. Span styles and line alignment carry over.
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    if line.width() <= width {
        return vec![line.clone()];
    }

    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    // Whitespace waits here until the next word is known to fit after it
    let mut pending: Vec<(&str, Style)> = Vec::new();

    for span in &line.spans {
        for token in split_words(&span.content) {
            if token.chars().all(char::is_whitespace) {
                // Swallowed at a break point
                if used > 0 || out.is_empty() {
                    pending.push((token, span.style));
                }
                continue;
            }

            let token_width = token.width();
            let gap: usize = pending.iter().map(|(text, _)| text.width()).sum();
            if used > 0 && used + gap + token_width > width {
                out.push(finish(&mut current, line));
                used = 0;
                pending.clear();
            } else if used + gap + token_width <= width {
                for (text, style) in pending.drain(..) {
                    push_text(&mut current, text, style);
                }
                used += gap;
            } else {
                pending.clear();
            }

            if token_width <= width {
                push_text(&mut current, token, span.style);
                used += token_width;
                continue;
            }

            for c in token.chars() {
                let char_width = c.width().unwrap_or(0);
                if used + char_width > width && used > 0 {
                    out.push(finish(&mut current, line));
                    used = 0;
                }
                let mut buf = [0u8; 4];
                push_text(&mut current, c.encode_utf8(&mut buf), span.style);
                used += char_width;
            }
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(finish(&mut current, line));
    }
    out
}

fn finish(current: &mut Vec<Span<'static>>, template: &Line<'static>) -> Line<'static> {
    let mut line = Line::from(std::mem::take(current)).style(template.style);
    line.alignment = template.alignment;
    line
}

/// Append text, merging into the previous span when the style matches.
fn push_text(current: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if let Some(last) = current.last_mut() {
        if last.style == style {
            last.content.to_mut().push_str(text);
            return;
        }
    }
    current.push(Span::styled(text.to_string(), style));
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_space: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if prev_space.is_some_and(|p| p != space) {
            tokens.push(&text[start..i]);
            start = i;
        }
        prev_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Alignment;
    use ratatui::style::{Color, Modifier};

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_short_line_untouched() {
        let line = Line::raw("short");
        assert_eq!(wrap_line(&line, 20), vec![line]);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let line = Line::raw("the quick brown fox jumps");
        let wrapped = wrap_line(&line, 10);
        assert_eq!(texts(&wrapped), vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_long_word_is_split() {
        let line = Line::raw("abcdefghij");
        let wrapped = wrap_line(&line, 4);
        assert_eq!(texts(&wrapped), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wide_chars_use_display_width() {
        let line = Line::raw("你好世界");
        let wrapped = wrap_line(&line, 4);
        assert_eq!(texts(&wrapped), vec!["你好", "世界"]);
    }

    #[test]
    fn test_styles_and_alignment_survive() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::raw("plain words "),
            Span::styled("bold words", bold),
        ])
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::Red));

        let wrapped = wrap_line(&line, 12);
        assert_eq!(texts(&wrapped), vec!["plain words", "bold words"]);
        assert!(wrapped
            .iter()
            .all(|l| l.alignment == Some(Alignment::Right)));
        assert_eq!(wrapped[1].spans[0].style, bold);
        assert_eq!(wrapped[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_right_aligned_rows_have_no_trailing_space() {
        let line = Line::raw("aaaa bbbb cccc").alignment(Alignment::Right);
        let wrapped = wrap_line(&line, 5);
        assert_eq!(texts(&wrapped), vec!["aaaa", "bbbb", "cccc"]);
        assert!(wrapped.iter().all(|l| !l.to_string().ends_with(' ')));
        assert!(wrapped.iter().all(|l| !l.to_string().starts_with(' ')));
    }

    #[test]
    fn test_space_runs_inside_a_row_are_kept() {
        let line = Line::raw("ab  cd efgh");
        let wrapped = wrap_line(&line, 6);
        assert_eq!(texts(&wrapped), vec!["ab  cd", "efgh"]);
    }

    #[test]
    fn test_wrap_lines_flattens() {
        let lines = vec![Line::raw("aaa bbb"), Line::raw("")];
        assert_eq!(wrap_lines(&lines, 3).len(), 3);
    }
}
