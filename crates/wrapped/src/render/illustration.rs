//! Decorative, gently moving artwork painted behind each slide's text.

use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Pos2, Shape, Stroke, Vec2};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Illustration {
    Orbits,
    Bars,
    Rings,
    Stack,
    Bubbles,
    Flame,
    Moon,
    Network,
    Sparkles,
    Confetti,
}

impl Illustration {
    pub fn for_slide_id(id: &str) -> Self {
        match id {
            "intro" => Self::Orbits,
            "commits" => Self::Bars,
            "languages" => Self::Rings,
            "top-repo" => Self::Stack,
            "reviews" => Self::Bubbles,
            "streak" => Self::Flame,
            "night-owl" => Self::Moon,
            "collab" => Self::Network,
            "issues" | "milestones" => Self::Sparkles,
            "whats-next" => Self::Confetti,
            _ => Self::Orbits,
        }
    }

    pub fn paint(
        self,
        painter: &egui::Painter,
        rect: egui::Rect,
        theme: &Theme,
        time: f32,
        opacity: f32,
    ) {
        if opacity < 0.01 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let painter = painter.with_clip_rect(rect);
        let accent = Theme::with_opacity(theme.accent, opacity * 0.85);
        let alt = Theme::with_opacity(theme.accent_alt, opacity * 0.75);
        let soft = Theme::with_opacity(theme.foreground, opacity * 0.15);
        let center = rect.center();
        let r = rect.width().min(rect.height()) * 0.42;

        match self {
            Self::Orbits => {
                for (i, k) in [0.45_f32, 0.7, 0.95].into_iter().enumerate() {
                    painter.circle_stroke(center, r * k, Stroke::new(r * 0.012, soft));
                    let angle = time * (0.35 + i as f32 * 0.2) + i as f32 * 2.1;
                    let color = if i % 2 == 0 { accent } else { alt };
                    painter.circle_filled(center + polar(r * k, angle), r * 0.06, color);
                }
                painter.circle_filled(center, r * 0.18, accent);
            }
            Self::Bars => {
                let count = 7;
                let gap = r * 0.06;
                let bar_w = (r * 2.0 - gap * (count as f32 - 1.0)) / count as f32;
                let base = center.y + r;
                for i in 0..count {
                    let phase = (time * 1.4 + i as f32 * 0.7).sin() * 0.5 + 0.5;
                    let h = r * (0.5 + 0.25 * i as f32 / count as f32 + 0.9 * phase * 0.6);
                    let x = center.x - r + i as f32 * (bar_w + gap);
                    let top_left = Pos2::new(x, base - h);
                    let bar = egui::Rect::from_min_max(top_left, Pos2::new(x + bar_w, base));
                    let color = if i == count - 2 { alt } else { accent };
                    painter.rect_filled(bar, bar_w * 0.2, color);
                }
            }
            Self::Rings => {
                let shares = [0.64_f32, 0.21, 0.11, 0.04];
                let mut start = time * 0.15;
                for (i, share) in shares.into_iter().enumerate() {
                    let color = match i {
                        0 => accent,
                        1 => alt,
                        _ => soft,
                    };
                    let sweep = share * TAU;
                    let stroke = Stroke::new(r * 0.16, color);
                    arc(&painter, center, r * 0.8, start, start + sweep, stroke);
                    start += sweep + 0.04;
                }
            }
            Self::Stack => {
                for i in 0..4 {
                    let lift = (time * 0.9 + i as f32).sin() * r * 0.03;
                    let w = r * (1.6 - i as f32 * 0.25);
                    let h = r * 0.28;
                    let y = center.y + r * 0.6 - i as f32 * h * 1.2 + lift;
                    let card =
                        egui::Rect::from_center_size(Pos2::new(center.x, y), Vec2::new(w, h));
                    let color = if i == 3 { alt } else { accent };
                    let fill = Theme::with_opacity(color, opacity * (0.4 + i as f32 * 0.2));
                    painter.rect_filled(card, h * 0.25, fill);
                }
            }
            Self::Bubbles => {
                for i in 0..9 {
                    let seed = i as f32 * 1.37;
                    let x = center.x + (seed * 2.3).sin() * r * 0.9;
                    let drift = ((time * 0.25 + seed * 0.37) % 1.0) * 2.0 - 1.0;
                    let y = center.y - drift * r;
                    let radius = r * (0.08 + 0.06 * (seed * 3.1).cos().abs());
                    let color = if i % 3 == 0 { alt } else { accent };
                    painter.circle_filled(Pos2::new(x, y), radius, color);
                }
            }
            Self::Flame => {
                let flicker = (time * 6.0).sin() * 0.04 + (time * 9.7).cos() * 0.03;
                let outer = flame(center, r, 1.0 + flicker);
                let inner = flame(center + Vec2::new(0.0, r * 0.25), r * 0.55, 1.0 - flicker);
                painter.add(Shape::convex_polygon(outer, accent, Stroke::NONE));
                painter.add(Shape::convex_polygon(inner, alt, Stroke::NONE));
            }
            Self::Moon => {
                let moon_center = center + Vec2::new(r * 0.2, -r * 0.2);
                painter.circle_filled(moon_center, r * 0.55, accent);
                let shadow = moon_center + Vec2::new(r * 0.22, -r * 0.12);
                painter.circle_filled(shadow, r * 0.5, theme.background_top);
                for i in 0..8 {
                    let seed = i as f32 * 2.7;
                    let p = center + Vec2::new((seed * 1.9).sin() * r, (seed * 1.3).cos() * r);
                    let twinkle = ((time * 2.0 + seed).sin() * 0.5 + 0.5) * opacity;
                    let star = Theme::with_opacity(theme.foreground, twinkle);
                    painter.circle_filled(p, r * 0.025, star);
                }
            }
            Self::Network => {
                let nodes: Vec<Pos2> = (0..7)
                    .map(|i| {
                        let angle = i as f32 / 7.0 * TAU + time * 0.1;
                        let wobble = 1.0 + (time + i as f32).sin() * 0.05;
                        center + polar(r * 0.8 * wobble, angle)
                    })
                    .collect();
                for (i, a) in nodes.iter().enumerate() {
                    painter.line_segment([center, *a], Stroke::new(r * 0.01, soft));
                    let b = nodes[(i + 2) % nodes.len()];
                    painter.line_segment([*a, b], Stroke::new(r * 0.008, soft));
                }
                for (i, node) in nodes.iter().enumerate() {
                    let color = if i % 2 == 0 { accent } else { alt };
                    painter.circle_filled(*node, r * 0.08, color);
                }
                painter.circle_filled(center, r * 0.14, accent);
            }
            Self::Sparkles => {
                for i in 0..6 {
                    let seed = i as f32 * 1.9;
                    let offset = Vec2::new((seed * 2.1).cos(), (seed * 1.7).sin()) * r * 0.8;
                    let p = center + offset;
                    let pulse = (time * 1.8 + seed).sin() * 0.3 + 0.7;
                    let color = if i % 2 == 0 { accent } else { alt };
                    sparkle(&painter, p, r * 0.18 * pulse, color);
                }
            }
            Self::Confetti => {
                for i in 0..24 {
                    let seed = i as f32 * 0.77;
                    let fall = ((time * 0.18 + seed * 0.41) % 1.0) * 2.0 - 1.0;
                    let x = center.x + (seed * 3.3).sin() * r;
                    let y = center.y + fall * r;
                    let spin = time * 2.0 + seed;
                    let color = match i % 3 {
                        0 => accent,
                        1 => alt,
                        _ => Theme::with_opacity(theme.foreground, opacity * 0.8),
                    };
                    let half = Vec2::new(r * 0.04 * spin.cos(), r * 0.02);
                    let corners = vec![
                        Pos2::new(x - half.x, y - half.y),
                        Pos2::new(x + half.x, y - half.y),
                        Pos2::new(x + half.x, y + half.y),
                        Pos2::new(x - half.x, y + half.y),
                    ];
                    painter.add(Shape::convex_polygon(corners, color, Stroke::NONE));
                }
            }
        }
    }
}

fn polar(radius: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * radius, angle.sin() * radius)
}

fn arc(painter: &egui::Painter, center: Pos2, radius: f32, from: f32, to: f32, stroke: Stroke) {
    let steps = (((to - from).abs() / TAU) * 64.0).ceil().max(2.0) as usize;
    let points: Vec<Pos2> = (0..=steps)
        .map(|i| center + polar(radius, from + (to - from) * i as f32 / steps as f32))
        .collect();
    painter.add(Shape::line(points, stroke));
}

fn flame(center: Pos2, r: f32, stretch: f32) -> Vec<Pos2> {
    let tip = center + Vec2::new(0.0, -r * 1.1 * stretch);
    vec![
        tip,
        center + Vec2::new(r * 0.45, -r * 0.2),
        center + Vec2::new(r * 0.55, r * 0.35),
        center + Vec2::new(r * 0.25, r * 0.75),
        center + Vec2::new(-r * 0.25, r * 0.75),
        center + Vec2::new(-r * 0.55, r * 0.35),
        center + Vec2::new(-r * 0.45, -r * 0.2),
    ]
}

fn sparkle(painter: &egui::Painter, p: Pos2, size: f32, color: Color32) {
    let stroke = Stroke::new(size * 0.18, color);
    painter.line_segment([p - Vec2::new(size, 0.0), p + Vec2::new(size, 0.0)], stroke);
    painter.line_segment([p - Vec2::new(0.0, size), p + Vec2::new(0.0, size)], stroke);
    painter.circle_filled(p, size * 0.2, color);
}
