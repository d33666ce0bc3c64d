//! Progress indicator and on-screen controls drawn over the slide.

use eframe::egui::{self, Pos2, Sense, Stroke, Vec2, WidgetInfo, WidgetType};

use crate::gesture::Intent;
use crate::progress::ProgressMarker;
use crate::shell::Command;
use crate::theme::Theme;

pub fn details_button_id() -> egui::Id {
    egui::Id::new("wrapped-details-open")
}

pub fn draw_progress(
    ui: &egui::Ui,
    rect: egui::Rect,
    marker: ProgressMarker,
    theme: &Theme,
    scale: f32,
) {
    let top = rect.top() + 36.0 * scale;
    let inset = 120.0 * scale;
    let track_w = rect.width() - inset * 2.0;
    let idle = Theme::with_opacity(theme.foreground, 0.3);
    let active = theme.foreground;

    match marker {
        ProgressMarker::Dots { total, .. } => {
            if total == 0 {
                return;
            }
            let gap = 8.0 * scale;
            let seg_w = ((track_w - gap * (total as f32 - 1.0)) / total as f32).max(2.0);
            let seg_h = 6.0 * scale;
            for (i, is_active) in marker.dots().into_iter().enumerate() {
                let x = rect.left() + inset + i as f32 * (seg_w + gap);
                let seg = egui::Rect::from_min_size(Pos2::new(x, top), Vec2::new(seg_w, seg_h));
                let color = if is_active { active } else { idle };
                ui.painter().rect_filled(seg, seg_h / 2.0, color);
            }
        }
        ProgressMarker::Bar { fraction } => {
            let h = 6.0 * scale;
            let track = egui::Rect::from_min_size(
                Pos2::new(rect.left() + inset, top),
                Vec2::new(track_w, h),
            );
            ui.painter().rect_filled(track, h / 2.0, idle);
            let fill = egui::Rect::from_min_size(
                track.min,
                Vec2::new(track_w * fraction.clamp(0.0, 1.0), h),
            );
            ui.painter().rect_filled(fill, h / 2.0, active);
        }
    }
}

/// Which controls are shown for the current slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub has_previous: bool,
    pub has_next: bool,
    pub has_details: bool,
    pub cta: Option<&'static str>,
}

impl Controls {
    /// Controls for slide `current` of `total`. The arrow buttons stop at
    /// the ends of the deck; only keys and swipes wrap around.
    pub fn at(current: usize, total: usize, has_details: bool, cta: Option<&'static str>) -> Self {
        Self {
            has_previous: current > 0,
            has_next: current + 1 < total,
            has_details,
            cta,
        }
    }
}

fn round_button(
    ui: &egui::Ui,
    id: egui::Id,
    center: Pos2,
    radius: f32,
    glyph: &str,
    label: &str,
    theme: &Theme,
) -> egui::Response {
    let rect = egui::Rect::from_center_size(center, Vec2::splat(radius * 2.0));
    let response = ui.interact(rect, id, Sense::click());
    response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, label));

    let fill = if response.hovered() {
        Theme::with_opacity(theme.foreground, 0.3)
    } else {
        Theme::with_opacity(theme.foreground, 0.15)
    };
    ui.painter().circle_filled(center, radius, fill);
    if response.has_focus() {
        ui.painter()
            .circle_stroke(center, radius + 3.0, Stroke::new(2.0, theme.accent));
    }
    ui.painter().text(
        center,
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::proportional(radius * 1.1),
        theme.foreground,
    );
    response
}

fn pill_button(
    ui: &egui::Ui,
    id: egui::Id,
    center: Pos2,
    text: &str,
    filled: bool,
    theme: &Theme,
    scale: f32,
) -> egui::Response {
    let font = egui::FontId::proportional(26.0 * scale);
    let color = if filled {
        theme.background_top
    } else {
        theme.foreground
    };
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let size = galley.rect.size() + Vec2::new(56.0 * scale, 28.0 * scale);
    let rect = egui::Rect::from_center_size(center, size);
    let response = ui.interact(rect, id, Sense::click());
    response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, text));

    let hover = if response.hovered() { 1.0 } else { 0.85 };
    let outline = Theme::with_opacity(theme.foreground, hover);
    if filled {
        ui.painter().rect_filled(rect, size.y / 2.0, outline);
    } else {
        ui.painter().rect_stroke(
            rect,
            size.y / 2.0,
            Stroke::new(2.0 * scale, outline),
            egui::StrokeKind::Inside,
        );
    }
    if response.has_focus() {
        ui.painter().rect_stroke(
            rect.expand(4.0),
            size.y / 2.0 + 4.0,
            Stroke::new(2.0, theme.accent),
            egui::StrokeKind::Outside,
        );
    }
    ui.painter()
        .galley(rect.center() - galley.rect.size() / 2.0, galley, color);
    response
}

/// Previous/next buttons, the details button and the call-to-action.
/// Returns the command for whichever control was clicked.
pub fn draw_controls(
    ui: &egui::Ui,
    rect: egui::Rect,
    controls: &Controls,
    theme: &Theme,
    scale: f32,
) -> Option<Command> {
    let radius = 32.0 * scale;
    let bottom = rect.bottom() - 70.0 * scale;
    let mut command = None;

    if controls.has_previous {
        let prev = round_button(
            ui,
            egui::Id::new("wrapped-prev"),
            Pos2::new(rect.left() + 90.0 * scale, bottom),
            radius,
            "\u{2039}",
            "Previous slide",
            theme,
        );
        if prev.clicked() {
            command = Some(Command::Navigate(Intent::Previous));
        }
    }

    if controls.has_next {
        let next = round_button(
            ui,
            egui::Id::new("wrapped-next"),
            Pos2::new(rect.right() - 90.0 * scale, bottom),
            radius,
            "\u{203A}",
            "Next slide",
            theme,
        );
        if next.clicked() {
            command = Some(Command::Navigate(Intent::Next));
        }
    }

    let mut x = rect.center().x;
    if controls.has_details && controls.cta.is_some() {
        x -= 150.0 * scale;
    }
    if controls.has_details {
        let details = pill_button(
            ui,
            details_button_id(),
            Pos2::new(x, bottom),
            "More details",
            false,
            theme,
            scale,
        );
        if details.clicked() {
            command = Some(Command::OpenDetails);
        }
        x += 300.0 * scale;
    }
    if let Some(label) = controls.cta {
        let cta = pill_button(
            ui,
            egui::Id::new("wrapped-cta"),
            Pos2::new(x, bottom),
            label,
            true,
            theme,
            scale,
        );
        if cta.clicked() {
            command = Some(Command::InvokeCta);
        }
    }

    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_slide_hides_previous() {
        let controls = Controls::at(0, 11, false, None);
        assert!(!controls.has_previous);
        assert!(controls.has_next);
    }

    #[test]
    fn test_last_slide_hides_next() {
        let controls = Controls::at(10, 11, true, Some("Go"));
        assert!(controls.has_previous);
        assert!(!controls.has_next);
        assert!(controls.has_details);
        assert_eq!(controls.cta, Some("Go"));
    }

    #[test]
    fn test_middle_slide_shows_both_arrows() {
        let controls = Controls::at(4, 11, false, None);
        assert!(controls.has_previous && controls.has_next);
    }

    #[test]
    fn test_single_slide_has_no_arrows() {
        let controls = Controls::at(0, 1, false, None);
        assert!(!controls.has_previous);
        assert!(!controls.has_next);
    }
}
