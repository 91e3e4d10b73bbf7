//! Rich text → ratatui Lines renderer for reply bubbles.
//!
//! Reply content arrives pre-rendered: markdown, often with inline HTML
//! (`<p>`, `<br>`, `<b>`, `<em>`, `<q>`, ...). Known tags become styles or
//! line breaks, unknown tags are dropped, entities are decoded.
//!
//! This renderer does not sanitize anything. Content is trusted as produced
//! upstream.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

use crate::tui::theme;

/// Opening, closing or self-closing tag. Captures: (slash)(name).
static HTML_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("Failed to compile HTML tag regex")
});

/// Lines for one reply bubble. While `loading`, the content is replaced by
/// a pending placeholder.
pub fn bubble_lines(content: &str, loading: bool, pending_label: &str) -> Vec<Line<'static>> {
    if loading {
        return vec![Line::from(vec![
            Span::styled("▍ ", theme::spinner()),
            Span::styled(pending_label.to_string(), theme::dim()),
        ])];
    }
    rich_to_lines(content)
}

/// Convert markdown-with-inline-HTML to ratatui Lines.
pub fn rich_to_lines(content: &str) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::new();
    let mut in_code_block = false;

    for event in Parser::new(content) {
        match event {
            // ── Headings ─────────────────────────────────────────
            Event::Start(Tag::Heading { .. }) => {
                builder.flush();
                builder.push_style(|s| s.fg(theme::GOLD).add_modifier(Modifier::BOLD));
            }
            Event::End(TagEnd::Heading(_)) => {
                builder.pop_style();
                builder.flush();
            }

            // ── Bold / Italic ────────────────────────────────────
            Event::Start(Tag::Strong) => builder.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Event::Start(Tag::Emphasis) => {
                builder.push_style(|s| s.add_modifier(Modifier::ITALIC));
            }
            Event::End(TagEnd::Strong) | Event::End(TagEnd::Emphasis) => builder.pop_style(),

            // ── Inline code / code blocks ────────────────────────
            Event::Code(code) => {
                builder.push_span(Span::styled(
                    format!(" {code} "),
                    Style::default().fg(theme::PARCHMENT).bg(theme::BG_SURFACE),
                ));
            }
            Event::Start(Tag::CodeBlock(_)) => {
                builder.flush();
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                builder.blank_line();
            }

            // ── Lists ────────────────────────────────────────────
            Event::Start(Tag::List(_)) => builder.list_depth += 1,
            Event::End(TagEnd::List(_)) => {
                builder.list_depth = builder.list_depth.saturating_sub(1);
                if builder.list_depth == 0 {
                    builder.blank_line();
                }
            }
            Event::Start(Tag::Item) => {
                builder.flush();
                let indent = "  ".repeat(builder.list_depth.saturating_sub(1));
                builder.push_span(Span::styled(format!("{indent}• "), theme::muted()));
            }
            Event::End(TagEnd::Item) => builder.flush(),

            // ── Paragraphs / quotes ──────────────────────────────
            Event::End(TagEnd::Paragraph) => builder.paragraph_break(),
            Event::Start(Tag::BlockQuote) => {
                builder.flush();
                builder.push_style(|s| s.fg(theme::INK).add_modifier(Modifier::ITALIC));
                builder.push_span(Span::styled("│ ", theme::dim()));
            }
            Event::End(TagEnd::BlockQuote) => {
                builder.flush();
                builder.pop_style();
            }

            // ── Text content ─────────────────────────────────────
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        builder.lines.push(Line::styled(
                            line.to_string(),
                            Style::default().fg(theme::PARCHMENT).bg(theme::BG_SURFACE),
                        ));
                    }
                } else {
                    builder.push_text(&text);
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => builder.html(&html),

            // ── Breaks ───────────────────────────────────────────
            Event::SoftBreak => builder.push_text(" "),
            Event::HardBreak => builder.hard_break(),
            Event::Rule => {
                builder.flush();
                builder.lines.push(Line::styled("─".repeat(40), theme::dim()));
                builder.blank_line();
            }

            _ => {}
        }
    }

    builder.finish()
}

/// Accumulates spans into lines with a style stack shared by markdown and
/// HTML formatting.
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// Names of open HTML tags that pushed a style, innermost last.
    html_open: Vec<String>,
    list_depth: usize,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            spans: Vec::new(),
            styles: vec![Style::default().fg(theme::PARCHMENT)],
            html_open: Vec::new(),
            list_depth: 0,
        }
    }

    fn current_style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.current_style());
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn push_span(&mut self, span: Span<'static>) {
        self.spans.push(span);
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.current_style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    /// Ends the current line even when it is empty.
    fn hard_break(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    fn blank_line(&mut self) {
        // Never leading, never doubled
        if self.lines.last().map_or(true, |l| l.spans.is_empty()) {
            return;
        }
        self.lines.push(Line::raw(""));
    }

    fn paragraph_break(&mut self) {
        self.flush();
        self.blank_line();
    }

    /// Apply an HTML fragment: text between tags is emitted, known tags
    /// adjust style or break lines.
    fn html(&mut self, fragment: &str) {
        let mut cursor = 0;
        for caps in HTML_TAG_PATTERN.captures_iter(fragment) {
            let Some(whole) = caps.get(0) else { continue };
            self.html_text(&fragment[cursor..whole.start()]);
            cursor = whole.end();

            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let name = caps
                .get(2)
                .map(|m| m.as_str().to_ascii_lowercase())
                .unwrap_or_default();
            if closing {
                self.html_close(&name);
            } else {
                self.html_open(&name);
            }
        }
        self.html_text(&fragment[cursor..]);
    }

    fn html_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let collapsed = raw.replace(['\n', '\r'], " ");
        // Indentation between block tags is not content
        if self.spans.is_empty() && collapsed.trim().is_empty() {
            return;
        }
        let text = decode_entities(&collapsed);
        let text = if self.spans.is_empty() {
            text.trim_start().to_string()
        } else {
            text
        };
        self.push_text(&text);
    }

    fn html_open(&mut self, name: &str) {
        match name {
            "br" => self.hard_break(),
            "p" | "div" => self.flush(),
            "b" | "strong" => {
                self.push_style(|s| s.add_modifier(Modifier::BOLD));
                self.html_open.push(name.to_string());
            }
            "i" | "em" => {
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
                self.html_open.push(name.to_string());
            }
            "q" => {
                self.push_text("“");
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
                self.html_open.push(name.to_string());
            }
            _ => {}
        }
    }

    fn html_close(&mut self, name: &str) {
        match name {
            "p" => self.paragraph_break(),
            "div" => self.flush(),
            _ => {
                if self.html_open.last().map(String::as_str) == Some(name) {
                    self.html_open.pop();
                    self.pop_style();
                    if name == "q" {
                        self.push_text("”");
                    }
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self
            .lines
            .last()
            .is_some_and(|l| l.spans.is_empty() || l.to_string().trim().is_empty())
        {
            self.lines.pop();
        }
        self.lines
    }
}

/// Decode the handful of entities that show up in reply markup.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_plain_text() {
        let lines = rich_to_lines("Hello world");
        assert_eq!(plain(&lines), vec!["Hello world"]);
    }

    #[test]
    fn test_markdown_bold() {
        let lines = rich_to_lines("**bold text**");
        assert!(lines[0]
            .spans
            .iter()
            .any(|s| s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn test_html_paragraphs_and_breaks() {
        let lines = rich_to_lines("<p>The fire crackles.</p>\n<p>Elowen<br>smiles.</p>");
        assert_eq!(
            plain(&lines),
            vec!["The fire crackles.", "", "Elowen", "smiles."]
        );
    }

    #[test]
    fn test_inline_html_styles() {
        let lines = rich_to_lines("She says <b>nothing</b> at <em>all</em>.");
        let line = &lines[0];
        assert_eq!(line.to_string(), "She says nothing at all.");
        let bold = line.spans.iter().find(|s| s.content == "nothing").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = line.spans.iter().find(|s| s.content == "all").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
        let after = line.spans.iter().find(|s| s.content == ".").unwrap();
        assert!(!after.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_quote_tag_adds_marks() {
        let lines = rich_to_lines("<p><q>Welcome, traveler.</q></p>");
        assert_eq!(plain(&lines), vec!["“Welcome, traveler.”"]);
    }

    #[test]
    fn test_unknown_tags_dropped_and_entities_decoded() {
        let lines = rich_to_lines("<p><span class=\"x\">Fish &amp; chips &lt;3</span></p>");
        assert_eq!(plain(&lines), vec!["Fish & chips <3"]);
    }

    #[test]
    fn test_stray_closing_tag_keeps_style_stack() {
        let lines = rich_to_lines("<p>a</b> <b>b</b></p>");
        assert_eq!(plain(&lines), vec!["a b"]);
    }

    #[test]
    fn test_loading_replaces_content() {
        let lines = bubble_lines("ignored", true, "Writing...");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].to_string().contains("Writing..."));
        assert!(!lines[0].to_string().contains("ignored"));
    }

    #[test]
    fn test_list() {
        let lines = rich_to_lines("- north road\n- river ford");
        let text = plain(&lines).join("\n");
        assert!(text.contains("• north road"));
        assert!(text.contains("• river ford"));
    }

    #[test]
    fn test_empty_input() {
        assert!(rich_to_lines("").is_empty());
        assert!(rich_to_lines("<p></p>").is_empty());
    }
}
