pub mod chrome;
pub mod details;
pub mod illustration;

use std::sync::Arc;

use eframe::egui::{self, Galley, Pos2};

use crate::deck::{Slide, StatValue};
use crate::theme::Theme;

use illustration::Illustration;

/// Scale factor relative to a 1920x1080 reference canvas.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Format a counter value as a whole number with thousands separators.
/// Fractions are dropped, so a counter never shows more than it has reached.
pub fn format_count(value: f64) -> String {
    let whole = value.max(0.0).floor() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Text shown as the slide's headline statistic. Numbers use the running
/// counter value when one is given. `None` unless the slide has both a
/// label and a value.
pub fn stat_text(slide: &Slide, counter: Option<f64>) -> Option<String> {
    let (_, value) = slide.stat()?;
    match value {
        StatValue::Number(target) => Some(format_count(counter.unwrap_or(target))),
        StatValue::Text(text) => Some(text.to_string()),
    }
}

/// Paint a vertical gradient filling `rect`.
pub fn draw_background(ui: &egui::Ui, rect: egui::Rect, theme: &Theme, opacity: f32) {
    let top = Theme::with_opacity(theme.background_top, opacity);
    let bottom = Theme::with_opacity(theme.background_bottom, opacity);

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);
    ui.painter().add(egui::Shape::mesh(mesh));
}

struct TextBlock {
    galley: Arc<Galley>,
    gap_after: f32,
}

fn text_blocks(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    width: f32,
    opacity: f32,
    counter: Option<f64>,
    scale: f32,
) -> Vec<TextBlock> {
    let fg = Theme::with_opacity(theme.foreground, opacity);
    let muted = Theme::with_opacity(theme.muted, opacity);
    let accent = Theme::with_opacity(theme.accent, opacity);
    let painter = ui.painter();
    let mut blocks = Vec::new();

    blocks.push(TextBlock {
        galley: painter.layout(
            slide.title.to_string(),
            egui::FontId::proportional(theme.title_size * scale),
            fg,
            width,
        ),
        gap_after: 24.0 * scale,
    });

    if let Some(((label, _), stat)) = slide.stat().zip(stat_text(slide, counter)) {
        blocks.push(TextBlock {
            galley: painter.layout_no_wrap(
                stat,
                egui::FontId::proportional(theme.stat_size * scale),
                accent,
            ),
            gap_after: 4.0 * scale,
        });
        blocks.push(TextBlock {
            galley: painter.layout(
                label.to_uppercase(),
                egui::FontId::monospace(theme.label_size * scale),
                accent,
                width,
            ),
            gap_after: 40.0 * scale,
        });
    }

    blocks.push(TextBlock {
        galley: painter.layout(
            slide.subtitle.to_string(),
            egui::FontId::proportional(theme.subtitle_size * scale),
            muted,
            width,
        ),
        gap_after: 0.0,
    });

    blocks
}

fn text_width(rect: egui::Rect, scale: f32) -> f32 {
    (rect.width() - 2.0 * padding(scale)) * 0.62
}

fn padding(scale: f32) -> f32 {
    120.0 * scale
}

/// Returns (content_height, available_height) for a slide laid out in `rect`.
pub fn measure_slide_content_height(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> (f32, f32) {
    let blocks = text_blocks(ui, slide, theme, text_width(rect, scale), 1.0, None, scale);
    let content: f32 = blocks
        .iter()
        .map(|b| b.galley.rect.height() + b.gap_after)
        .sum();
    let available = rect.height() - 2.0 * padding(scale);
    (content, available)
}

/// Render one slide. `time` drives the decorative motion; `scroll_offset`
/// shifts the text when it overflows the viewport.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    counter: Option<f64>,
    time: f32,
    scroll_offset: f32,
    scale: f32,
) {
    let pad = padding(scale);

    let art_rect = egui::Rect::from_min_max(
        egui::pos2(rect.left() + rect.width() * 0.55, rect.top() + pad * 0.5),
        egui::pos2(rect.right() - pad * 0.5, rect.bottom() - pad * 0.5),
    );
    Illustration::for_slide_id(slide.id).paint(ui.painter(), art_rect, theme, time, opacity);

    let width = text_width(rect, scale);
    let blocks = text_blocks(ui, slide, theme, width, opacity, counter, scale);
    let total: f32 = blocks
        .iter()
        .map(|b| b.galley.rect.height() + b.gap_after)
        .sum();

    let content_top = rect.top() + pad;
    let available = rect.height() - 2.0 * pad;
    let mut y = if total < available {
        content_top + (available - total) / 2.0
    } else {
        content_top - scroll_offset
    };

    let clip = ui.painter().with_clip_rect(rect);
    for block in blocks {
        let height = block.galley.rect.height();
        clip.galley(
            Pos2::new(rect.left() + pad, y),
            block.galley,
            Theme::with_opacity(theme.foreground, opacity),
        );
        y += height + block.gap_after;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideTheme;

    fn stat_slide(value: StatValue) -> Slide {
        Slide {
            id: "commits",
            title: "Commits",
            subtitle: "",
            stat_label: Some("commits"),
            stat_value: Some(value),
            theme: SlideTheme::B,
            details: &[],
        }
    }

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1847.0), "1,847");
        assert_eq!(format_count(1_234_567.4), "1,234,567");
        assert_eq!(format_count(1846.99), "1,846");
        assert_eq!(format_count(-3.0), "0");
    }

    #[test]
    fn test_stat_text_uses_counter_for_numbers() {
        let slide = stat_slide(StatValue::Number(1847.0));
        assert_eq!(stat_text(&slide, Some(12.6)).as_deref(), Some("12"));
        assert_eq!(stat_text(&slide, None).as_deref(), Some("1,847"));
    }

    #[test]
    fn test_stat_text_passes_text_through() {
        let slide = stat_slide(StatValue::Text("64% Rust"));
        assert_eq!(stat_text(&slide, Some(3.0)).as_deref(), Some("64% Rust"));
    }

    #[test]
    fn test_stat_without_label_is_not_shown() {
        let mut slide = stat_slide(StatValue::Number(1847.0));
        slide.stat_label = None;
        assert_eq!(stat_text(&slide, Some(100.0)), None);
    }

    #[test]
    fn test_scale_reference() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(rect), 0.5);
    }
}
