use eframe::egui;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::animation::{SlideTransition, TransitionDirection};
use crate::config::Settings;
use crate::deck::content::wrapped_deck;
use crate::input;
use crate::overlay::FocusHost;
use crate::render::{self, chrome, details};
use crate::shell::{Command, CtaCallback, Shell};
use crate::theme::Theme;

const CTA_LABEL: &str = "See what's next";
const AMBIENT_REPAINT: Duration = Duration::from_millis(33);

/// Focus and scrolling as egui sees them.
struct EguiFocus<'a> {
    ctx: &'a egui::Context,
    scroll_locked: &'a mut bool,
}

impl FocusHost for EguiFocus<'_> {
    fn focused(&self) -> Option<egui::Id> {
        self.ctx.memory(|m| m.focused())
    }

    fn focus(&mut self, id: Option<egui::Id>) {
        self.ctx.memory_mut(|m| match id {
            Some(id) => m.request_focus(id),
            None => {
                if let Some(current) = m.focused() {
                    m.surrender_focus(current);
                }
            }
        });
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        *self.scroll_locked = locked;
    }
}

struct PresentationApp {
    shell: Shell,
    start: Instant,
    scroll_locked: bool,
    scroll_offsets: Vec<f32>,
    scroll_targets: Vec<f32>,
    last_slide: usize,
}

impl PresentationApp {
    fn new(shell: Shell) -> Self {
        let slide_count = shell.deck().len();
        let last_slide = shell.current();
        Self {
            shell,
            start: Instant::now(),
            scroll_locked: false,
            scroll_offsets: vec![0.0; slide_count],
            scroll_targets: vec![0.0; slide_count],
            last_slide,
        }
    }

    fn host<'a>(ctx: &'a egui::Context, scroll_locked: &'a mut bool) -> EguiFocus<'a> {
        EguiFocus { ctx, scroll_locked }
    }

    fn handle_input(&mut self, ctx: &egui::Context, now: Instant) {
        // Collect viewport commands to send after the input closure
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let events = ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            if !self.scroll_locked {
                let scroll = i.smooth_scroll_delta;
                if scroll.y != 0.0 {
                    let idx = self.shell.current();
                    self.scroll_targets[idx] -= scroll.y;
                }
            }
            i.events.clone()
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        let mut consumed = Vec::new();
        for event in events.iter().flat_map(input::from_egui) {
            let mut host = Self::host(ctx, &mut self.scroll_locked);
            if self.shell.handle_event(&event, &mut host, now) {
                consumed.extend(event.egui_key());
            }
        }
        if !consumed.is_empty() {
            ctx.input_mut(|i| {
                for (modifiers, key) in consumed {
                    i.consume_key(modifiers, key);
                }
            });
        }

        // Keep egui from moving focus on keys the shell owns.
        let overlay_open = self.shell.overlay_mut().is_open();
        ctx.memory_mut(|m| {
            if let Some(id) = m.focused() {
                m.set_focus_lock_filter(
                    id,
                    egui::EventFilter {
                        tab: overlay_open,
                        horizontal_arrows: true,
                        vertical_arrows: false,
                        escape: true,
                    },
                );
            }
        });
    }

    fn run_command(&mut self, ctx: &egui::Context, command: Command, now: Instant) {
        debug!(?command, "control activated");
        let mut host = Self::host(ctx, &mut self.scroll_locked);
        self.shell.command(command, &mut host, now);
    }

    fn draw_slide(
        &self,
        ui: &egui::Ui,
        index: usize,
        rect: egui::Rect,
        counter: Option<f64>,
        scroll_offset: f32,
        scale: f32,
    ) {
        let slide = self.shell.deck().slide(index);
        let theme = Theme::for_slide(slide.theme);
        let time = self.start.elapsed().as_secs_f32();
        render::draw_background(ui, rect, &theme, 1.0);
        render::render_slide(
            ui,
            slide,
            &theme,
            rect,
            1.0,
            counter,
            time,
            scroll_offset,
            scale,
        );
    }

    fn draw_transition(
        &self,
        ui: &egui::Ui,
        transition: SlideTransition,
        rect: egui::Rect,
        now: Instant,
        scale: f32,
    ) {
        let progress = transition.progress(now);
        let w = rect.width();
        let sign = match transition.direction {
            TransitionDirection::Forward => -1.0,
            TransitionDirection::Backward => 1.0,
        };
        let from_offset = sign * progress * w;
        let to_offset = from_offset - sign * w;

        let from_rect = rect.translate(egui::vec2(from_offset, 0.0));
        let to_rect = rect.translate(egui::vec2(to_offset, 0.0));

        self.draw_slide(ui, transition.from, from_rect, None, 0.0, scale);
        self.draw_slide(
            ui,
            transition.to,
            to_rect,
            self.shell.counter_value(),
            0.0,
            scale,
        );
    }

    /// Draw the current slide, scrolling its text when it overflows.
    /// Returns whether the scroll position is still animating.
    fn draw_with_scroll(&mut self, ui: &egui::Ui, rect: egui::Rect, scale: f32) -> bool {
        let idx = self.shell.current();
        let slide = self.shell.current_slide();
        let theme = Theme::for_slide(slide.theme);
        let (content_height, available_height) =
            render::measure_slide_content_height(ui, slide, &theme, rect, scale);
        let overflow = content_height - available_height;

        let mut animating = false;
        if overflow <= 0.0 {
            self.scroll_offsets[idx] = 0.0;
            self.scroll_targets[idx] = 0.0;
        } else {
            self.scroll_targets[idx] = self.scroll_targets[idx].clamp(0.0, overflow);
            let target = self.scroll_targets[idx];
            let current = self.scroll_offsets[idx];
            let diff = target - current;
            if diff.abs() < 0.5 {
                self.scroll_offsets[idx] = target;
            } else {
                // Move 15% of the remaining distance each frame
                self.scroll_offsets[idx] = current + diff * 0.15;
                animating = true;
            }
        }

        let offset = self.scroll_offsets[idx];
        self.draw_slide(ui, idx, rect, self.shell.counter_value(), offset, scale);
        animating
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.handle_input(ctx, now);

        let current = self.shell.current();
        if current != self.last_slide {
            self.scroll_targets[self.last_slide] = 0.0;
            self.scroll_offsets[self.last_slide] = 0.0;
            self.last_slide = current;
            let slide = self.shell.current_slide();
            debug!(
                slide = slide.id,
                theme = Theme::for_slide(slide.theme).name,
                "showing slide"
            );
        }

        let mut animating = self.shell.tick(now);
        let mut pending: Option<Command> = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = render::compute_scale(rect);
                let slide = self.shell.current_slide().clone();
                let theme = Theme::for_slide(slide.theme);

                match self.shell.transition() {
                    Some(transition) => self.draw_transition(ui, transition, rect, now, scale),
                    None => animating |= self.draw_with_scroll(ui, rect, scale),
                }

                chrome::draw_progress(ui, rect, self.shell.progress(), &theme, scale);
                let controls = chrome::Controls::at(
                    self.shell.current(),
                    self.shell.deck().len(),
                    slide.has_details(),
                    self.shell.cta_available().then_some(CTA_LABEL),
                );
                pending = chrome::draw_controls(ui, rect, &controls, &theme, scale);

                if let Some(modal) = self.shell.modal_slide().cloned() {
                    let modal_theme = Theme::for_slide(modal.theme);
                    let response = details::show(ctx, rect, &modal, &modal_theme, scale);
                    self.shell
                        .overlay_mut()
                        .set_content_rect(response.content_rect);
                    if response.close_requested {
                        pending = Some(Command::CloseDetails);
                    }
                }
            });

        if let Some(command) = pending {
            self.run_command(ctx, command, now);
            animating = true;
        }

        if animating {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(AMBIENT_REPAINT);
        }
    }
}

impl Drop for PresentationApp {
    fn drop(&mut self) {
        self.shell.teardown();
    }
}

pub fn run(settings: Settings, windowed: bool) -> anyhow::Result<()> {
    let deck = wrapped_deck()?;
    let title = "Wrapped".to_string();
    info!(
        slides = deck.len(),
        start = settings.shell.start_slide + 1,
        progress = settings.shell.progress.name(),
        cta = settings.cta_url.is_some(),
        "starting presentation"
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let cta = settings.cta_url.map(|url| {
                let ctx = cc.egui_ctx.clone();
                Box::new(move || ctx.open_url(egui::OpenUrl::new_tab(&url))) as CtaCallback
            });
            let shell = Shell::new(deck, settings.shell, cta, Instant::now());
            Ok(Box::new(PresentationApp::new(shell)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
