use ratatui::style::Color;

/// One of two disjoint palettes applied to every structural element.
/// Purely presentational: the active theme never affects data operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection: Color,
    pub done: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            border: Color::Gray,
            accent: Color::Blue,
            muted: Color::DarkGray,
            selection: Color::LightBlue,
            done: Color::Green,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::White,
            border: Color::DarkGray,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection: Color::DarkGray,
            done: Color::Green,
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_are_distinct() {
        assert_ne!(Theme::light(), Theme::dark());
        assert_eq!(Theme::for_mode(true), Theme::dark());
        assert_eq!(Theme::for_mode(false), Theme::light());
    }
}
