use ratatui::style::Color;

/// Colours for one appearance of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub bot: Color,
    pub border: Color,
    pub focus: Color,
    pub disabled: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::White,
            text: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            user: Color::Blue,
            bot: Color::DarkGray,
            border: Color::Gray,
            focus: Color::Blue,
            disabled: Color::Gray,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            user: Color::Cyan,
            bot: Color::Yellow,
            border: Color::DarkGray,
            focus: Color::Yellow,
            disabled: Color::DarkGray,
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
