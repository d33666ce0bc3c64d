use eframe::egui::Color32;

use crate::deck::SlideTheme;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub background_top: Color32,
    pub background_bottom: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub accent_alt: Color32,
    pub panel: Color32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub stat_size: f32,
    pub label_size: f32,
    pub body_size: f32,
}

impl Theme {
    fn base(name: &'static str) -> Self {
        Self {
            name,
            background_top: Color32::BLACK,
            background_bottom: Color32::BLACK,
            foreground: Color32::WHITE,
            muted: Color32::from_rgb(0xD0, 0xD0, 0xD8),
            accent: Color32::WHITE,
            accent_alt: Color32::WHITE,
            panel: Color32::from_rgb(0x16, 0x16, 0x1E),
            title_size: 88.0,
            subtitle_size: 40.0,
            stat_size: 180.0,
            label_size: 36.0,
            body_size: 34.0,
        }
    }

    /// Violet to magenta.
    pub fn a() -> Self {
        Self {
            background_top: Color32::from_rgb(0x3A, 0x0C, 0xA3),
            background_bottom: Color32::from_rgb(0xB5, 0x17, 0x9E),
            accent: Color32::from_rgb(0xF7, 0x25, 0x85),
            accent_alt: Color32::from_rgb(0x4C, 0xC9, 0xF0),
            ..Self::base("a")
        }
    }

    /// Deep green to lime.
    pub fn b() -> Self {
        Self {
            background_top: Color32::from_rgb(0x06, 0x4E, 0x3B),
            background_bottom: Color32::from_rgb(0x1D, 0xB9, 0x54),
            accent: Color32::from_rgb(0xC6, 0xF6, 0x8D),
            accent_alt: Color32::from_rgb(0xFF, 0xD1, 0x66),
            ..Self::base("b")
        }
    }

    /// Burnt orange to gold.
    pub fn c() -> Self {
        Self {
            background_top: Color32::from_rgb(0x9A, 0x34, 0x12),
            background_bottom: Color32::from_rgb(0xF5, 0x9E, 0x0B),
            accent: Color32::from_rgb(0xFF, 0xF1, 0xC1),
            accent_alt: Color32::from_rgb(0xFF, 0x6B, 0x6B),
            ..Self::base("c")
        }
    }

    /// Midnight to cyan.
    pub fn d() -> Self {
        Self {
            background_top: Color32::from_rgb(0x0B, 0x13, 0x2B),
            background_bottom: Color32::from_rgb(0x1C, 0x7E, 0xD6),
            accent: Color32::from_rgb(0x5B, 0xC0, 0xEB),
            accent_alt: Color32::from_rgb(0xF2, 0x5F, 0x5C),
            ..Self::base("d")
        }
    }

    pub fn for_slide(theme: SlideTheme) -> Self {
        match theme {
            SlideTheme::A => Self::a(),
            SlideTheme::B => Self::b(),
            SlideTheme::C => Self::c(),
            SlideTheme::D => Self::d(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}
