use ratatui::style::{Color, Modifier, Style};

use crate::core::message::Speaker;

#[derive(Debug, Clone)]
pub struct Theme {
    pub title_style: Style,
    pub heading_style: Style,

    // Transcript blocks
    pub human_label_style: Style,
    pub human_text_style: Style,
    pub assistant_label_style: Style,
    pub assistant_text_style: Style,

    // Chrome
    pub field_border_style: Style,
    pub focused_border_style: Style,
    pub field_title_style: Style,
    pub input_text_style: Style,
    pub placeholder_style: Style,
    pub button_style: Style,
    pub selected_button_style: Style,
    pub waiting_style: Style,

    // Notices
    pub warning_style: Style,
    pub success_style: Style,
    pub error_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light_blocks()
    }
}

impl Theme {
    /// Green blocks for the user, grey blocks for the bot.
    pub fn light_blocks() -> Self {
        let human_bg = Color::Rgb(0xd4, 0xed, 0xda);
        let assistant_bg = Color::Rgb(0xe2, 0xe3, 0xe5);
        let ink = Color::Rgb(0x21, 0x25, 0x29);

        Theme {
            title_style: Style::default().add_modifier(Modifier::BOLD),
            heading_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),

            human_label_style: Style::default()
                .fg(ink)
                .bg(human_bg)
                .add_modifier(Modifier::BOLD),
            human_text_style: Style::default().fg(ink).bg(human_bg),
            assistant_label_style: Style::default()
                .fg(ink)
                .bg(assistant_bg)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(ink).bg(assistant_bg),

            field_border_style: Style::default().fg(Color::Gray),
            focused_border_style: Style::default().fg(Color::Cyan),
            field_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::Reset),
            placeholder_style: Style::default().fg(Color::DarkGray),
            button_style: Style::default().fg(Color::Gray),
            selected_button_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            waiting_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            warning_style: Style::default().fg(Color::Yellow),
            success_style: Style::default().fg(Color::Green),
            error_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Attribute-only styling for terminals where colour is unwanted.
    pub fn monochrome() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Theme {
            title_style: bold,
            heading_style: bold,
            human_label_style: bold,
            human_text_style: Style::default(),
            assistant_label_style: bold.add_modifier(Modifier::ITALIC),
            assistant_text_style: Style::default(),
            field_border_style: Style::default(),
            focused_border_style: bold,
            field_title_style: Style::default(),
            input_text_style: Style::default(),
            placeholder_style: Style::default().add_modifier(Modifier::DIM),
            button_style: Style::default(),
            selected_button_style: Style::default().add_modifier(Modifier::REVERSED),
            waiting_style: Style::default().add_modifier(Modifier::ITALIC),
            warning_style: bold,
            success_style: Style::default(),
            error_style: bold,
        }
    }

    /// Honour the NO_COLOR convention.
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(value) if !value.is_empty() => Self::monochrome(),
            _ => Self::light_blocks(),
        }
    }

    pub fn label_style(&self, speaker: Speaker) -> Style {
        match speaker {
            Speaker::Human => self.human_label_style,
            Speaker::Assistant => self.assistant_label_style,
        }
    }

    pub fn text_style(&self, speaker: Speaker) -> Style {
        match speaker {
            Speaker::Human => self.human_text_style,
            Speaker::Assistant => self.assistant_text_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speakers_get_distinct_block_colours() {
        let theme = Theme::light_blocks();
        assert_ne!(
            theme.text_style(Speaker::Human).bg,
            theme.text_style(Speaker::Assistant).bg
        );
        assert_eq!(
            theme.text_style(Speaker::Human).bg,
            Some(Color::Rgb(0xd4, 0xed, 0xda))
        );
    }

    #[test]
    fn monochrome_uses_no_colours() {
        let theme = Theme::monochrome();
        for speaker in [Speaker::Human, Speaker::Assistant] {
            assert_eq!(theme.label_style(speaker).fg, None);
            assert_eq!(theme.text_style(speaker).bg, None);
        }
    }
}
