use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use crate::app::{App, InputMode, ViewLayout, SPINNER_FRAMES};
use crate::message::Sender;
use crate::theme::Theme;

pub const TITLE: &str = "FAQ Chatbot";
pub const PLACEHOLDER: &str = "Type your question...";
pub const SEND_LABEL: &str = "Send";

const SEND_BUTTON_WIDTH: u16 = 10;
const SPINNER: [&str; SPINNER_FRAMES as usize] = ["|", "/", "-", "\\"];

/// Wrap text to fit within a given width, returning multiple lines.
/// Breaks on whitespace; words longer than the width are split.
pub fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Hard-break words that can never fit
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word_len = word.len();
        if word_len == 0 {
            continue;
        }

        if current_len == 0 {
            current_line = word.into_iter().collect();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.extend(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.into_iter().collect();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Label on the theme toggle: names the mode you switch *to*
pub fn theme_toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "Light Mode"
    } else {
        "Dark Mode"
    }
}

/// Draw the whole widget and report where each control ended up.
pub fn render(app: &App, frame: &mut Frame) -> ViewLayout {
    let area = frame.area();
    let theme = Theme::for_mode(app.dark_mode);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    // Main layout: header, transcript, input row, footer
    let [header_area, transcript_area, input_row, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [input_area, send_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SEND_BUTTON_WIDTH),
    ])
    .areas(input_row);

    let theme_toggle = render_header(app, &theme, frame, header_area);
    render_transcript(app, &theme, frame, transcript_area);
    render_input(app, &theme, frame, input_area);
    render_send_button(app, &theme, frame, send_area);
    render_footer(app, &theme, frame, footer_area);

    ViewLayout {
        transcript: transcript_area,
        input: input_area,
        send_button: send_area,
        theme_toggle,
    }
}

fn render_header(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) -> Option<Rect> {
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", TITLE),
        Style::default().fg(theme.accent).bold(),
    )));
    frame.render_widget(title, area);

    if !app.variant.is_enhanced() {
        return None;
    }

    let label = format!("[ {} ]", theme_toggle_label(app.dark_mode));
    let width = (label.chars().count() as u16).min(area.width);
    let toggle_area = Rect {
        x: area.x + area.width - width,
        width,
        ..area
    };
    let toggle = Paragraph::new(label).style(Style::default().fg(theme.accent));
    frame.render_widget(toggle, toggle_area);

    Some(toggle_area)
}

fn render_transcript(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    // Same width the scroll math in App uses
    let wrap_width = match area.width.saturating_sub(2) {
        0 => 50,
        w => w as usize,
    };

    let mut lines: Vec<Line> = Vec::new();

    for msg in &app.messages {
        let color = match msg.sender {
            Sender::User => theme.user,
            Sender::Bot => theme.bot,
        };
        lines.push(Line::from(Span::styled(
            msg.sender.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for line in msg.text.split('\n') {
            for wrapped in wrap_text_to_width(line, wrap_width) {
                lines.push(Line::from(Span::styled(wrapped, Style::default().fg(theme.text))));
            }
        }
        lines.push(Line::default());
    }

    if app.show_thinking() {
        lines.push(Line::from(Span::styled(
            Sender::Bot.label(),
            Style::default().fg(theme.bot).add_modifier(Modifier::BOLD),
        )));
        // The text stays put; only the spinner moves
        let spinner = SPINNER[app.animation_frame as usize % SPINNER.len()];
        lines.push(Line::from(Span::styled(
            format!("Thinking... {}", spinner),
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )));
    }

    let transcript = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((app.scroll, 0));

    frame.render_widget(transcript, area);
}

fn render_input(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let enabled = app.input_enabled();
    let editing = enabled && app.input_mode == InputMode::Editing;

    let border_color = if !enabled {
        theme.disabled
    } else if editing {
        theme.focus
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    // Horizontal scrolling keeps the cursor inside the box
    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width == 0 || app.cursor < inner_width {
        0
    } else {
        app.cursor - inner_width + 1
    };

    let input = if app.input.is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(theme.muted))
    } else {
        let visible_text: String = app
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        let color = if enabled { theme.text } else { theme.disabled };
        Paragraph::new(visible_text).style(Style::default().fg(color))
    };

    frame.render_widget(input.block(block), area);

    if editing {
        let cursor_x = (app.cursor - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_send_button(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let color = if app.send_enabled() { theme.accent } else { theme.disabled };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let button = Paragraph::new(SEND_LABEL)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold())
        .block(block);

    frame.render_widget(button, area);
}

fn render_footer(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let hints = match (app.input_mode, app.variant.is_enhanced()) {
        (InputMode::Editing, _) => " Enter send | Esc leave input | Ctrl+C quit ",
        (InputMode::Normal, true) => {
            " i/Tab type | d dark mode | PgUp/PgDn scroll | q quit "
        }
        (InputMode::Normal, false) => " i/Tab type | PgUp/PgDn scroll | q quit ",
    };

    let footer = Paragraph::new(hints).style(Style::default().fg(theme.muted));
    frame.render_widget(footer, area);
}
