//! Word wrapping for styled transcript lines.
//!
//! The transcript is broken into rows here and drawn without `Wrap`, so the
//! row count used for bottom anchoring and scrolling is exactly what ends up
//! on screen.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

type Cell = (char, Style);

/// Break `line` into rows no wider than `width` columns, preferring word
/// boundaries. Words wider than a row are split; whitespace that falls on a
/// break is dropped.
pub fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let cells: Vec<Cell> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row: Vec<Cell> = Vec::new();
    let mut row_width = 0usize;

    for token in cells.chunk_by(|a, b| a.0.is_whitespace() == b.0.is_whitespace()) {
        let token_width = cells_width(token);
        if row_width + token_width <= width {
            row.extend_from_slice(token);
            row_width += token_width;
            continue;
        }

        if token[0].0.is_whitespace() {
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            continue;
        }

        if token_width <= width {
            rows.push(std::mem::take(&mut row));
            row.extend_from_slice(token);
            row_width = token_width;
            continue;
        }

        for &(ch, style) in token {
            let ch_width = ch.width().unwrap_or(0);
            if row_width + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push((ch, style));
            row_width += ch_width;
        }
    }

    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows.into_iter().map(|row| into_line(&row, line.style)).collect()
}

/// Wrap every line, keeping their order.
pub fn wrap_lines(lines: &[Line<'_>], width: usize) -> Vec<Line<'static>> {
    lines.iter().flat_map(|line| wrap_line(line, width)).collect()
}

fn cells_width(cells: &[Cell]) -> usize {
    cells.iter().map(|(ch, _)| ch.width().unwrap_or(0)).sum()
}

fn into_line(row: &[Cell], style: Style) -> Line<'static> {
    let spans: Vec<Span<'static>> = row
        .chunk_by(|a, b| a.1 == b.1)
        .map(|run| Span::styled(run.iter().map(|(ch, _)| *ch).collect::<String>(), run[0].1))
        .collect();
    Line::from(spans).style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn breaks_at_word_boundaries() {
        let rows = wrap_line(&Line::from("hello world foo"), 11);
        assert_eq!(texts(&rows), vec!["hello world", "foo"]);
    }

    #[test]
    fn splits_words_wider_than_a_row() {
        let rows = wrap_line(&Line::from("abcdefghij"), 4);
        assert_eq!(texts(&rows), vec!["abcd", "efgh", "ij"]);

        let rows = wrap_line(&Line::from("ab cdefghij"), 4);
        assert_eq!(texts(&rows), vec!["ab c", "defg", "hij"]);
    }

    #[test]
    fn whitespace_on_a_break_is_dropped() {
        assert_eq!(texts(&wrap_line(&Line::from("abcd "), 4)), vec!["abcd"]);
        assert_eq!(texts(&wrap_line(&Line::from("abcd  ef"), 4)), vec!["abcd", "ef"]);
    }

    #[test]
    fn empty_line_keeps_one_row() {
        let rows = wrap_line(&Line::from(""), 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(texts(&rows), vec![""]);
    }

    #[test]
    fn styles_survive_wrapping() {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let body = Style::default().bg(Color::Gray);
        let line = Line::from(vec![
            Span::styled("You: ", label),
            Span::styled("hi there", body),
        ])
        .style(body);

        let rows = wrap_line(&line, 7);
        assert_eq!(texts(&rows), vec!["You: hi", "there"]);
        assert_eq!(rows[0].spans.len(), 2);
        assert_eq!(rows[0].spans[0].style, label);
        assert_eq!(rows[0].spans[1].style, body);
        assert_eq!(rows[1].spans[0].style, body);
        assert!(rows.iter().all(|row| row.style == body));
    }

    #[test]
    fn wide_characters_count_double() {
        let rows = wrap_line(&Line::from("😊😊😊"), 4);
        assert_eq!(texts(&rows), vec!["😊😊", "😊"]);
    }

    #[test]
    fn wrap_lines_keeps_order() {
        let lines = vec![Line::from("one two"), Line::from(""), Line::from("three")];
        assert_eq!(texts(&wrap_lines(&lines, 3)), vec!["one", "two", "", "thr", "ee"]);
    }
}
