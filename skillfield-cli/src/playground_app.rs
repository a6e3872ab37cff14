//! Interactive playground window
//!
//! Hosts one mounted simulation inside an egui canvas. The canvas size seen on
//! the first frame becomes the container; the config file is watched and any
//! change remounts the playground.

use eframe::egui;
use glam::Vec2;
use log::{error, info, warn};
use notify::{Event, RecommendedWatcher, Watcher};
use skillfield_core::{
    advance_frame, build_simulation_context_from_config, get_entity_states, handle_pointer,
    step_simulation, sync_display, PlaygroundConfig, PointerEvent, SimulationContext, SkillRecord,
    TranslationBuffer,
};
use std::path::PathBuf;
use std::sync::mpsc;

const HINT: &str = "Click to blast • Drag to throw";

fn to_vec2(p: egui::Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn to_egui(v: Vec2) -> egui::Vec2 {
    egui::vec2(v.x, v.y)
}

pub struct PlaygroundApp {
    config_path: Option<PathBuf>,
    skills_override: Option<PathBuf>,
    config: PlaygroundConfig,
    skills: Vec<SkillRecord>,
    ctx_opt: Option<SimulationContext>,
    display: TranslationBuffer,
    last_load_error: Option<String>,
    playing: bool,
    speed_multiplier: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_mount: bool,
}

impl PlaygroundApp {
    pub fn new(
        config_path: Option<PathBuf>,
        skills_override: Option<PathBuf>,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        Self::with_paths(config_path, skills_override)
    }

    fn with_paths(config_path: Option<PathBuf>, skills_override: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone during shutdown
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), config_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                warn!("not watching {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            config_path,
            skills_override,
            config: PlaygroundConfig::default(),
            skills: Vec::new(),
            ctx_opt: None,
            display: TranslationBuffer::new(),
            last_load_error: None,
            playing: true,
            speed_multiplier: 1.0,
            file_watcher: watcher,
            file_receiver: rx,
            needs_mount: true,
        };
        app.reload_config();
        app
    }

    fn reload_config(&mut self) {
        let loaded = crate::load_config(self.config_path.as_deref(), self.skills_override.as_deref())
            .and_then(|config| config.skills().map(|skills| (config, skills)));

        match loaded {
            Ok((config, skills)) => {
                info!("loaded {} skills", skills.len());
                self.config = config;
                self.skills = skills;
                self.last_load_error = None;
                self.needs_mount = true;
            }
            Err(e) => {
                error!("config reload failed: {}", e);
                self.last_load_error = Some(e.to_string());
                self.unmount();
                self.needs_mount = false;
                self.playing = false;
            }
        }
    }

    fn unmount(&mut self) {
        if let Some(mut ctx) = self.ctx_opt.take() {
            ctx.cancel();
        }
        self.display.clear();
    }

    /// Mount a fresh playground sized to `rect`
    fn mount(&mut self, rect: egui::Rect) {
        self.unmount();
        self.needs_mount = false;

        let viewport = Vec2::new(rect.width(), rect.height());
        match build_simulation_context_from_config(&self.config, &self.skills, viewport) {
            Ok(mut ctx) => {
                ctx.container.set_origin(to_vec2(rect.min));
                self.display = TranslationBuffer::bound_to(ctx.store());
                sync_display(ctx.store(), &mut self.display);
                self.ctx_opt = Some(ctx);
                self.last_load_error = None;
                self.playing = true;
            }
            Err(e) => {
                self.last_load_error = Some(e.to_string());
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut changed = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.config_path {
                        changed |= paths.iter().any(|p| p.ends_with(path) || p == path);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("file watcher error: {}", e),
            }
        }

        if changed {
            self.reload_config();
            self.playing = self.last_load_error.is_none();
        }
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, rect: egui::Rect) {
        let Some(ctx) = self.ctx_opt.as_mut() else {
            return;
        };
        ctx.container.set_origin(to_vec2(rect.min));

        let (pressed, released, latest, moved) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.pointer.delta() != egui::Vec2::ZERO,
            )
        });
        let inside = latest.filter(|p| rect.contains(*p));

        if let (true, Some(p)) = (pressed, inside) {
            handle_pointer(ctx, PointerEvent::Press(to_vec2(p)));
        }

        if ctx.controller.dragged().is_some() {
            match inside {
                Some(p) if moved => {
                    handle_pointer(ctx, PointerEvent::Move(to_vec2(p)));
                }
                Some(_) => {}
                None => {
                    handle_pointer(ctx, PointerEvent::Leave);
                }
            }
        }

        if released {
            handle_pointer(ctx, PointerEvent::Release);
        }

        if response.clicked() {
            if let Some(p) = response.interact_pointer_pos() {
                handle_pointer(ctx, PointerEvent::Click(to_vec2(p)));
            }
        }
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect, hover: Option<egui::Pos2>) {
        let visuals = painter.ctx().style().visuals.clone();
        painter.rect_filled(rect, 16.0, visuals.extreme_bg_color);
        painter.text(
            rect.min + egui::vec2(20.0, 16.0),
            egui::Align2::LEFT_TOP,
            HINT,
            egui::FontId::proportional(13.0),
            visuals.weak_text_color(),
        );

        let Some(ctx) = &self.ctx_opt else {
            return;
        };
        let hovered = hover
            .filter(|p| rect.contains(*p))
            .and_then(|p| ctx.store().hit_test(ctx.container.to_local(to_vec2(p))));

        for entity in get_entity_states(ctx) {
            let Some(top_left) = self.display.translation(entity.id) else {
                continue;
            };
            let center = rect.min + to_egui(top_left + Vec2::splat(entity.radius));
            let highlight = entity.dragged || hovered == Some(entity.id);

            painter.circle_filled(center, entity.radius, visuals.widgets.inactive.bg_fill);
            let stroke = if highlight {
                egui::Stroke::new(2.0, egui::Color32::from_rgb(99, 102, 241))
            } else {
                egui::Stroke::new(1.0, visuals.widgets.inactive.bg_stroke.color)
            };
            painter.circle_stroke(center, entity.radius, stroke);
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                &entity.label,
                egui::FontId::proportional(14.0),
                visuals.strong_text_color(),
            );
        }
    }
}

impl eframe::App for PlaygroundApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏮ Reset").clicked() {
                    self.needs_mount = true;
                }

                if ui.button("⏭ Step").clicked() {
                    if let Some(sim) = self.ctx_opt.as_mut() {
                        step_simulation(sim, &mut self.display);
                    }
                }

                ui.separator();

                if let Some(sim) = self.ctx_opt.as_mut() {
                    let mut zero_gravity = sim.zero_gravity();
                    if ui.checkbox(&mut zero_gravity, "Zero gravity").changed() {
                        sim.set_zero_gravity(zero_gravity);
                    }

                    let mut strength = sim.gravity_strength();
                    ui.label("Gravity:");
                    if ui.add(egui::Slider::new(&mut strength, 0.0..=2.0)).changed() {
                        sim.set_gravity_strength(strength);
                    }
                }

                ui.separator();

                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.speed_multiplier, 1.0..=5.0));

                ui.separator();

                if let Some(sim) = &self.ctx_opt {
                    ui.label(format!("Frame: {}", sim.frame));
                }
            });
        });

        if let Some(ref error) = self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;

            if self.needs_mount {
                self.mount(rect);
            }

            self.handle_input(ui, &response, rect);

            if self.playing {
                if let Some(sim) = self.ctx_opt.as_mut() {
                    let steps_per_frame = self.speed_multiplier.max(1.0).round() as usize;
                    if advance_frame(sim, &mut self.display, steps_per_frame) {
                        self.playing = false;
                    }
                }
            }

            self.paint(&painter, rect, response.hover_pos());
        });

        if self.playing {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(10.0, 40.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_mount_uses_canvas_and_plays() {
        let mut app = PlaygroundApp::with_paths(None, None);

        app.mount(canvas());

        let ctx = app.ctx_opt.as_ref().expect("default config should mount");
        assert!(app.playing);
        assert_eq!(ctx.container.size(), Vec2::new(800.0, 600.0));
        assert_eq!(ctx.container.to_local(Vec2::new(10.0, 40.0)), Vec2::ZERO);
        assert_eq!(app.display.len(), ctx.store().len());
    }

    #[test]
    fn test_reset_after_failed_mount_resumes_playing() {
        let mut app = PlaygroundApp::with_paths(None, None);
        app.config.container_width = Some(20.0);

        app.mount(canvas());
        assert!(app.ctx_opt.is_none());
        assert!(!app.playing);
        assert!(app.last_load_error.is_some());

        app.config.container_width = None;
        app.mount(canvas());

        assert!(app.ctx_opt.is_some());
        assert!(app.playing);
        assert!(app.last_load_error.is_none());
    }
}
