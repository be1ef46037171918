//! Color theme preference.

use std::{fmt, str::FromStr};

/// Preference key the theme is stored under.
pub const THEME_KEY: &str = "tuganire-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_switches_between_dark_and_light() {
        // テスト項目: テーマの切り替えで dark と light が入れ替わる
        // given (前提条件):
        let theme = Theme::default();

        // when (操作):
        let once = theme.toggled();
        let twice = once.toggled();

        // then (期待する結果):
        assert_eq!(theme, Theme::Dark);
        assert_eq!(once, Theme::Light);
        assert_eq!(twice, Theme::Dark);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        // テスト項目: 未知の値はテーマとして解析されない
        // given (前提条件):

        // when (操作):
        let light = "light".parse::<Theme>();
        let unknown = "sepia".parse::<Theme>();

        // then (期待する結果):
        assert_eq!(light, Ok(Theme::Light));
        assert!(unknown.is_err());
    }
}
