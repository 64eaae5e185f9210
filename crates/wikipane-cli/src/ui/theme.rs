use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct ThemeTokens {
    pub top_bar: Style,
    pub status: Style,
    pub status_error: Style,
    pub pane_border: Style,
    pub pane_focus: Style,
    pub prompt: Style,
}

pub fn build_theme(no_color: bool) -> ThemeTokens {
    if no_color {
        return monochrome_theme();
    }

    ThemeTokens {
        top_bar: Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        status: Style::default().fg(Color::Green),
        status_error: Style::default().fg(Color::Red),
        pane_border: Style::default().fg(Color::DarkGray),
        pane_focus: Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
        prompt: Style::default().fg(Color::Yellow),
    }
}

fn monochrome_theme() -> ThemeTokens {
    ThemeTokens {
        top_bar: Style::default().add_modifier(Modifier::BOLD),
        status: Style::default(),
        status_error: Style::default().add_modifier(Modifier::REVERSED),
        pane_border: Style::default(),
        pane_focus: Style::default().add_modifier(Modifier::BOLD),
        prompt: Style::default().add_modifier(Modifier::UNDERLINED),
    }
}
