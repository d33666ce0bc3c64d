use eframe::egui::{self, Color32, Pos2, Sense, Stroke, Vec2, WidgetInfo, WidgetType};

use crate::deck::Slide;
use crate::overlay::{close_button_id, done_button_id};
use crate::theme::Theme;

pub struct DetailsResponse {
    /// Screen area of the content panel.
    pub content_rect: egui::Rect,
    pub close_requested: bool,
}

/// Draw the details overlay for `slide` above everything inside `screen`.
///
/// The backdrop is an interactive layer so nothing underneath receives
/// clicks while the overlay is up.
pub fn show(
    ctx: &egui::Context,
    screen: egui::Rect,
    slide: &Slide,
    theme: &Theme,
    scale: f32,
) -> DetailsResponse {
    egui::Area::new(egui::Id::new("wrapped-details-backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(screen.size(), Sense::click());
            ui.painter().rect_filled(rect, 0.0, Color32::from_black_alpha(170));
        });

    let padding = 48.0 * scale;
    let width = (900.0 * scale).min(screen.width() * 0.85);
    let text_width = width - padding * 2.0;
    let fg = theme.foreground;
    let muted = theme.muted;

    let measure = ctx.layer_painter(egui::LayerId::background());
    let title = measure.layout(
        slide.title.to_string(),
        egui::FontId::proportional(44.0 * scale),
        fg,
        text_width - 60.0 * scale,
    );
    let lines: Vec<_> = slide
        .details
        .iter()
        .map(|line| {
            measure.layout(
                line.to_string(),
                egui::FontId::proportional(theme.body_size * scale),
                muted,
                text_width - 40.0 * scale,
            )
        })
        .collect();

    let line_gap = 20.0 * scale;
    let button_h = 64.0 * scale;
    let body_h: f32 = lines.iter().map(|g| g.rect.height() + line_gap).sum();
    let height = padding * 2.0 + title.rect.height() + 32.0 * scale + body_h + button_h;
    let panel = egui::Rect::from_center_size(screen.center(), Vec2::new(width, height));

    let mut close_requested = false;
    egui::Area::new(egui::Id::new("wrapped-details"))
        .order(egui::Order::Foreground)
        .fixed_pos(panel.min)
        .show(ctx, |ui| {
            let (panel, _) = ui.allocate_exact_size(panel.size(), Sense::click());
            let painter = ui.painter();
            painter.rect_filled(panel, 24.0 * scale, theme.panel);
            painter.rect_stroke(
                panel,
                24.0 * scale,
                Stroke::new(2.0 * scale, Theme::with_opacity(theme.accent, 0.6)),
                egui::StrokeKind::Inside,
            );

            let mut y = panel.top() + padding;
            let title_h = title.rect.height();
            painter.galley(Pos2::new(panel.left() + padding, y), title, fg);
            y += title_h + 32.0 * scale;

            for (i, galley) in lines.into_iter().enumerate() {
                let h = galley.rect.height();
                painter.text(
                    Pos2::new(panel.left() + padding, y),
                    egui::Align2::LEFT_TOP,
                    format!("{}", i + 1),
                    egui::FontId::monospace(theme.body_size * 0.8 * scale),
                    theme.accent,
                );
                let text_pos = Pos2::new(panel.left() + padding + 40.0 * scale, y);
                painter.galley(text_pos, galley, muted);
                y += h + line_gap;
            }

            let close_center =
                Pos2::new(panel.right() - padding, panel.top() + padding + 10.0 * scale);
            let close_rect = egui::Rect::from_center_size(close_center, Vec2::splat(44.0 * scale));
            let close = ui.interact(close_rect, close_button_id(), Sense::click());
            close.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, "Close details"));
            if close.hovered() || close.has_focus() {
                let hover = Theme::with_opacity(fg, 0.15);
                painter.circle_filled(close_center, 22.0 * scale, hover);
            }
            if close.has_focus() {
                let ring = Stroke::new(2.0, theme.accent);
                painter.circle_stroke(close_center, 24.0 * scale, ring);
            }
            painter.text(
                close_center,
                egui::Align2::CENTER_CENTER,
                "\u{00D7}",
                egui::FontId::proportional(36.0 * scale),
                fg,
            );

            let done_size = Vec2::new(180.0 * scale, button_h * 0.75);
            let done_rect = egui::Rect::from_min_size(
                panel.right_bottom() - Vec2::splat(padding) - done_size,
                done_size,
            );
            let done = ui.interact(done_rect, done_button_id(), Sense::click());
            done.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, "Got it"));
            let done_fill = if done.hovered() {
                theme.accent
            } else {
                Theme::with_opacity(theme.accent, 0.85)
            };
            painter.rect_filled(done_rect, done_rect.height() / 2.0, done_fill);
            if done.has_focus() {
                painter.rect_stroke(
                    done_rect.expand(4.0),
                    done_rect.height() / 2.0 + 4.0,
                    Stroke::new(2.0, fg),
                    egui::StrokeKind::Outside,
                );
            }
            painter.text(
                done_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Got it",
                egui::FontId::proportional(26.0 * scale),
                theme.panel,
            );

            close_requested = close.clicked() || done.clicked();
        });

    DetailsResponse {
        content_rect: panel,
        close_requested,
    }
}
