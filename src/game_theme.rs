use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTheme {
    Neon,
    Monokai,
    Dracula,
    Nord,
    HighContrast,
}

pub struct ThemeColors {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub accent: Color,
    pub left_paddle: Color,
    pub right_paddle: Color,
    pub ball: Color,
    pub score_shadow: Color,
}

impl GameTheme {
    /// Next theme in the cycle (pause popup's `d` key).
    pub fn next(self) -> Self {
        match self {
            GameTheme::Neon => GameTheme::Monokai,
            GameTheme::Monokai => GameTheme::Dracula,
            GameTheme::Dracula => GameTheme::Nord,
            GameTheme::Nord => GameTheme::HighContrast,
            GameTheme::HighContrast => GameTheme::Neon,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameTheme::Neon => "Neon",
            GameTheme::Monokai => "Monokai",
            GameTheme::Dracula => "Dracula",
            GameTheme::Nord => "Nord",
            GameTheme::HighContrast => "High Contrast",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            GameTheme::Neon => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(30, 60, 114), // deep night blue
                text: Color::Rgb(216, 222, 233),
                accent: Color::Rgb(255, 222, 0),
                left_paddle: Color::Rgb(8, 247, 254), // cyan
                right_paddle: Color::Rgb(247, 9, 107), // pink
                ball: Color::Rgb(255, 222, 0),        // yellow
                score_shadow: Color::Rgb(34, 34, 34),
            },
            GameTheme::Monokai => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(249, 38, 114), // Monokai pink
                text: Color::Rgb(248, 248, 242),  // Monokai foreground
                accent: Color::Rgb(166, 226, 46), // Monokai green
                left_paddle: Color::Rgb(102, 217, 239), // Monokai cyan
                right_paddle: Color::Rgb(174, 129, 255), // Monokai purple
                ball: Color::Rgb(255, 95, 135),   // Monokai light pink
                score_shadow: Color::Rgb(39, 40, 34),
            },
            GameTheme::Dracula => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(255, 121, 198), // Dracula pink
                text: Color::Rgb(248, 248, 242),   // Dracula foreground
                accent: Color::Rgb(189, 147, 249), // Dracula purple
                left_paddle: Color::Rgb(80, 250, 123), // Dracula green
                right_paddle: Color::Rgb(139, 233, 253), // Dracula cyan
                ball: Color::Rgb(255, 85, 85),     // Dracula red
                score_shadow: Color::Rgb(40, 42, 54),
            },
            GameTheme::Nord => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(136, 192, 208), // Nord border
                text: Color::Rgb(216, 222, 233),   // Nord fg
                accent: Color::Rgb(143, 188, 187), // Nord cyan
                left_paddle: Color::Rgb(94, 129, 172), // Nord blue
                right_paddle: Color::Rgb(180, 142, 173), // Nord purple
                ball: Color::Rgb(235, 203, 139),   // Nord yellow
                score_shadow: Color::Rgb(46, 52, 64),
            },
            GameTheme::HighContrast => ThemeColors {
                background: Color::Black, // true black for max contrast
                border: Color::White,
                text: Color::White,
                accent: Color::Yellow,
                left_paddle: Color::Rgb(0, 255, 255),
                right_paddle: Color::Rgb(0, 255, 0),
                ball: Color::Rgb(255, 0, 0),
                score_shadow: Color::Rgb(64, 64, 64),
            },
        }
    }
}
