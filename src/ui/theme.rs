//! Light and dark color palettes.
//!
//! The palette travels with every frame so a host can map it straight onto its
//! own styling (CSS custom properties, terminal colors, ...).

use crate::storage::ThemePreference;
use serde::Serialize;

/// Color scheme for a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: ThemePreference,
    pub colors: ThemeColors,
}

/// Hex color definitions for each gallery element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_dim: &'static str,
    pub accent: &'static str,
    pub favorite: &'static str,
    pub border: &'static str,
}

const LIGHT: ThemeColors = ThemeColors {
    background: "#eff1f5",
    surface: "#ffffff",
    text: "#4c4f69",
    text_dim: "#8c8fa1",
    accent: "#1e66f5",
    favorite: "#d20f39",
    border: "#ccd0da",
};

const DARK: ThemeColors = ThemeColors {
    background: "#1e1e2e",
    surface: "#313244",
    text: "#cdd6f4",
    text_dim: "#6c7086",
    accent: "#89b4fa",
    favorite: "#f38ba8",
    border: "#45475a",
};

impl Theme {
    /// Palette for a persisted preference.
    ///
    /// ```
    /// use marquee::storage::ThemePreference;
    /// use marquee::ui::Theme;
    ///
    /// let theme = Theme::for_preference(ThemePreference::Dark);
    /// assert_eq!(theme.colors.background, "#1e1e2e");
    /// ```
    #[must_use]
    pub const fn for_preference(name: ThemePreference) -> Self {
        let colors = match name {
            ThemePreference::Light => LIGHT,
            ThemePreference::Dark => DARK,
        };
        Self { name, colors }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_preference(ThemePreference::default())
    }
}
