use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::controller::{Notice, ViewState};
use crate::core::message::ChatTurn;
use crate::ui::screen::{DecisionButton, Focus, ScreenState};
use crate::ui::theme::Theme;
use crate::ui::wrap::wrap_lines;

pub const TITLE: &str = "Chatbot Interface";
pub const INPUT_PLACEHOLDER: &str = "Type your message here...";
pub const CONTINUE_PROMPT: &str = "Do you want to continue chatting?";
pub const FAREWELL: &str = "Goodbye! Have a great day! 😊";
pub const WAITING: &str = "Waiting for reply...";
const COMPOSER_TITLE: &str = "You: (Enter to send, Tab to switch field, Ctrl+C to quit)";

/// Everything one frame needs, borrowed from the controller and the loop.
pub struct RenderModel<'a> {
    pub view: &'a ViewState,
    pub transcript: &'a [ChatTurn],
    pub farewell: bool,
    pub screen: &'a ScreenState,
}

/// Turn the transcript into styled lines, one block per turn in order.
pub fn build_transcript_lines(transcript: &[ChatTurn], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for turn in transcript {
        let speaker = turn.speaker();
        let label_style = theme.label_style(speaker);
        let text_style = theme.text_style(speaker);
        let mut content_lines = turn.text().lines();

        let first = content_lines.next().unwrap_or_default();
        lines.push(
            Line::from(vec![
                Span::styled(format!("{}: ", speaker.label()), label_style),
                Span::styled(first.to_string(), text_style),
            ])
            .style(text_style),
        );
        for content_line in content_lines {
            lines.push(
                Line::from(Span::styled(content_line.to_string(), text_style)).style(text_style),
            );
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Draw one frame. Returns how many rows the transcript can scroll back from
/// its bottom-anchored position.
pub fn ui(f: &mut Frame, model: &RenderModel<'_>, theme: &Theme) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // session id
            Constraint::Min(3),    // transcript
            Constraint::Length(1), // notice
            Constraint::Length(3), // composer or decision
        ])
        .split(f.area());

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(TITLE, theme.title_style))),
        chunks[0],
    );
    draw_session_field(f, chunks[1], model, theme);
    let max_scroll = draw_transcript(f, chunks[2], model, theme);
    draw_notice(f, chunks[3], model, theme);

    if model.view.awaiting_continue_decision() {
        draw_decision(f, chunks[4], model, theme);
    } else {
        draw_composer(f, chunks[4], model, theme);
    }
    max_scroll
}

fn field_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if focused {
        theme.focused_border_style
    } else {
        theme.field_border_style
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, theme.field_title_style))
}

fn draw_session_field(f: &mut Frame, area: Rect, model: &RenderModel<'_>, theme: &Theme) {
    let focused = model.screen.focus == Focus::SessionId;
    let text = if focused {
        model.screen.session_draft.as_str()
    } else {
        model.view.session_id.as_str()
    };
    let field = Paragraph::new(Span::styled(text.to_string(), theme.input_text_style))
        .block(field_block("Enter Session ID:", focused, theme));
    f.render_widget(field, area);

    if focused && !model.screen.waiting {
        set_cursor_after(f, area, text);
    }
}

fn draw_transcript(f: &mut Frame, area: Rect, model: &RenderModel<'_>, theme: &Theme) -> u16 {
    let mut lines = build_transcript_lines(model.transcript, theme);
    if model.farewell {
        lines.push(Line::from(Span::styled(FAREWELL, theme.heading_style)));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.field_border_style)
        .title(Span::styled("Chat History", theme.heading_style));
    let inner = block.inner(area);

    let rows = wrap_lines(&lines, usize::from(inner.width));
    let total = u16::try_from(rows.len()).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(inner.height);
    let scroll = max_scroll.saturating_sub(model.screen.scroll_back);

    let transcript = Paragraph::new(rows).block(block).scroll((scroll, 0));
    f.render_widget(transcript, area);
    max_scroll
}

fn draw_notice(f: &mut Frame, area: Rect, model: &RenderModel<'_>, theme: &Theme) {
    let line = if model.screen.waiting {
        Some(Span::styled(WAITING, theme.waiting_style))
    } else {
        model.view.notice.as_ref().map(|notice| {
            let style = match notice {
                Notice::Warning(_) => theme.warning_style,
                Notice::Success(_) => theme.success_style,
                Notice::Error(_) => theme.error_style,
            };
            Span::styled(notice.text().to_string(), style)
        })
    };

    if let Some(span) = line {
        f.render_widget(Paragraph::new(Line::from(span)), area);
    }
}

fn draw_composer(f: &mut Frame, area: Rect, model: &RenderModel<'_>, theme: &Theme) {
    let focused = model.screen.focus == Focus::Message;
    let input = model.view.input.as_str();
    let span = if input.is_empty() {
        Span::styled(INPUT_PLACEHOLDER, theme.placeholder_style)
    } else {
        Span::styled(input.to_string(), theme.input_text_style)
    };

    let width = area.width.saturating_sub(2);
    let overflow = u16::try_from(input.width())
        .unwrap_or(u16::MAX)
        .saturating_sub(width.saturating_sub(1));
    let composer = Paragraph::new(Line::from(span))
        .block(field_block(COMPOSER_TITLE, focused, theme))
        .scroll((0, overflow));
    f.render_widget(composer, area);

    if focused && !model.screen.waiting {
        let visible = input.width().saturating_sub(usize::from(overflow));
        let x = area.x + 1 + u16::try_from(visible).unwrap_or(u16::MAX).min(width);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_decision(f: &mut Frame, area: Rect, model: &RenderModel<'_>, theme: &Theme) {
    let focused = model.screen.focus == Focus::Message;
    let button = |button: DecisionButton| -> Span<'static> {
        let style = if focused && model.screen.selected_button == button {
            theme.selected_button_style
        } else {
            theme.button_style
        };
        Span::styled(format!("[ {} ]", button.label()), style)
    };

    let line = Line::from(vec![
        button(DecisionButton::ContinueChat),
        Span::raw("  "),
        button(DecisionButton::ClearHistory),
        Span::styled("   (c / x, or ←/→ and Enter)", theme.placeholder_style),
    ]);
    let decision = Paragraph::new(line).block(field_block(CONTINUE_PROMPT, focused, theme));
    f.render_widget(decision, area);
}

fn set_cursor_after(f: &mut Frame, area: Rect, text: &str) {
    let max = area.width.saturating_sub(2);
    let offset = u16::try_from(text.width()).unwrap_or(u16::MAX).min(max);
    f.set_cursor_position((area.x + 1 + offset, area.y + 1));
}
