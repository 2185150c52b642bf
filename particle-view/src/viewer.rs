//! Native host for the particle field, built with eframe/egui.
//!
//! [`Viewer`] plays the role of the browser page in a canvas deployment:
//! it forwards pointer events into a [`Simulation`], drives
//! [`Simulation::advance_frame`] from the egui clock and paints the
//! returned [`DrawCommand`]s with the egui painter.

use eframe::App;
use glam::DVec2;
use particle_core::{
    config::{ConnectivityMode, SimConfig},
    render::{Color, DrawCommand},
    simulation::{Frame, Simulation},
};
use rand::{SeedableRng, rngs::StdRng};

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `sim` - The simulation being displayed.
/// - `cfg` - Configuration applied on the next reset; edited in the side panel.
/// - `seed` - Seed of the current simulation's random generator.
/// - `running` - Whether frames advance automatically.
/// - `last_frame` - Draw list from the most recent frame, repainted while paused.
/// - `was_down` - Pointer button state seen last frame, to emit down/up edges.
pub struct Viewer {
    sim: Simulation,
    cfg: SimConfig,
    seed: u64,

    running: bool,
    last_frame: Option<Frame>,
    was_down: bool,
}

impl Viewer {
    /// Creates a viewer with a random seed.
    pub fn new(cfg: SimConfig) -> Self {
        Self::with_seed(cfg, rand::random())
    }

    /// Creates a viewer whose initial particle placement is fixed by `seed`.
    ///
    /// An invalid `cfg` is reported and replaced by [`SimConfig::default`].
    pub fn with_seed(cfg: SimConfig, seed: u64) -> Self {
        let (sim, cfg) = match Simulation::new(cfg.clone(), StdRng::seed_from_u64(seed)) {
            Ok(sim) => (sim, cfg),
            Err(err) => {
                log::error!("{err}; falling back to the default configuration");
                let sim = Simulation::with_default_config(StdRng::seed_from_u64(seed));
                (sim, SimConfig::default())
            }
        };

        Self {
            sim,
            cfg,
            seed,
            running: true,
            last_frame: None,
            was_down: false,
        }
    }

    /// Restarts the simulation from `self.cfg` with a fresh seed.
    fn reset(&mut self) {
        self.seed = rand::random();
        match Simulation::new(self.cfg.clone(), StdRng::seed_from_u64(self.seed)) {
            Ok(sim) => {
                self.sim = sim;
                self.last_frame = None;
            }
            Err(err) => log::error!("cannot reset: {err}"),
        }
    }

    /// Scale and offset that fit the simulation surface inside `rect`,
    /// centered and aspect-preserving.
    fn fit(&self, rect: egui::Rect) -> (f32, egui::Vec2) {
        let bounds = self.sim.config().bounds;
        let scale = (rect.width() / bounds.x as f32).min(rect.height() / bounds.y as f32);
        let used = egui::vec2(bounds.x as f32 * scale, bounds.y as f32 * scale);
        let offset = rect.min.to_vec2() + (rect.size() - used) * 0.5;
        (scale, offset)
    }

    /// Converts a simulation-space position to screen-space.
    fn sim_to_screen(&self, p: DVec2, rect: egui::Rect) -> egui::Pos2 {
        let (scale, offset) = self.fit(rect);
        egui::pos2(p.x as f32 * scale, p.y as f32 * scale) + offset
    }

    /// Converts a screen-space position back to simulation-space.
    fn screen_to_sim(&self, p: egui::Pos2, rect: egui::Rect) -> DVec2 {
        let (scale, offset) = self.fit(rect);
        let local = (p - offset).to_vec2() / scale;
        DVec2::new(local.x as f64, local.y as f64)
    }

    /// Builds the top panel UI (run controls, reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time) * 1000.0;
                    self.last_frame = Some(self.sim.advance_frame(now));
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("seed = {}", self.seed));
                ui.separator();
                ui.label(format!("fps = {:.1}", self.sim.clock().smoothed_fps()));
                ui.label(format!("particles = {}", self.sim.system().len()));
                if let Some(frame) = &self.last_frame {
                    ui.label(format!("links = {}", frame.pairs.len()));
                }
            });
        });
    }

    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Keeps the starting population within the cap so `reset` validates.
    fn clamp_initial_count(cfg: &mut SimConfig) {
        cfg.initial_count = cfg.initial_count.min(cfg.max_population);
    }

    /// Builds the right-hand panel. Changes apply on the next reset.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                ui.label("Applied on reset.");

                ui.separator();
                ui.label("Population");
                Self::labeled_drag_usize(ui, "max:", &mut self.cfg.max_population, 1..=2000, 1.0);
                let max = self.cfg.max_population;
                Self::labeled_drag_usize(ui, "initial:", &mut self.cfg.initial_count, 0..=max, 1.0);
                Self::clamp_initial_count(&mut self.cfg);
                ui.horizontal(|ui| {
                    ui.label("burst:");
                    ui.add(egui::DragValue::new(&mut self.cfg.spawn_burst).range(0..=100));
                });

                ui.separator();
                ui.label("Physics");
                Self::labeled_drag_f64(ui, "gravity:", &mut self.cfg.gravity, -1.0..=1.0, 0.005);
                let mut damped = self.cfg.damping.is_some();
                if ui.checkbox(&mut damped, "damping").changed() {
                    self.cfg.damping = damped.then_some(0.99);
                }
                if let Some(factor) = self.cfg.damping.as_mut() {
                    Self::labeled_drag_f64(ui, "factor:", factor, 0.5..=1.0, 0.001);
                }
                Self::labeled_drag_f64(
                    ui,
                    "influence:",
                    &mut self.cfg.influence_radius,
                    0.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f64(
                    ui,
                    "strength:",
                    &mut self.cfg.attraction_strength,
                    0.0..=5.0,
                    0.01,
                );

                ui.separator();
                ui.label("Connectivity");
                let mut legacy = self.cfg.connectivity == ConnectivityMode::Unbounded;
                if ui.checkbox(&mut legacy, "unbounded (legacy)").changed() {
                    self.cfg.connectivity = if legacy {
                        ConnectivityMode::Unbounded
                    } else {
                        ConnectivityMode::Budgeted
                    };
                }
                Self::labeled_drag_f64(
                    ui,
                    "threshold:",
                    &mut self.cfg.connect_threshold,
                    0.0..=400.0,
                    1.0,
                );
                Self::labeled_drag_usize(
                    ui,
                    "considered:",
                    &mut self.cfg.max_considered,
                    0..=2000,
                    1.0,
                );
                Self::labeled_drag_usize(
                    ui,
                    "connections:",
                    &mut self.cfg.max_connections,
                    0..=5000,
                    1.0,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = SimConfig::default();
                }
                if ui.button("Legacy preset").clicked() {
                    self.cfg = SimConfig::legacy();
                }
            });
    }

    /// Forwards pointer state from egui to the simulation.
    fn forward_input(&mut self, ctx: &egui::Context, response: &egui::Response, rect: egui::Rect) {
        if let Some(p) = response.hover_pos() {
            let sim = self.screen_to_sim(p, rect);
            self.sim.pointer_move(sim.x, sim.y);
        }

        let down = response.is_pointer_button_down_on()
            && ctx.input(|i| i.pointer.primary_down());
        if down != self.was_down {
            if down {
                self.sim.pointer_down();
            } else {
                self.sim.pointer_up();
            }
            self.was_down = down;
        }

        if response.clicked()
            && let Some(p) = response.interact_pointer_pos()
        {
            let sim = self.screen_to_sim(p, rect);
            self.sim.click(sim.x, sim.y);
        }
    }

    /// Paints one frame's draw list.
    ///
    /// egui redraws from scratch every frame, so the surface is cleared to
    /// black first and the translucent fade rectangle darkens only that.
    fn paint(&self, painter: &egui::Painter, rect: egui::Rect, commands: &[DrawCommand]) {
        let (scale, _) = self.fit(rect);
        let surface = egui::Rect::from_two_pos(
            self.sim_to_screen(DVec2::ZERO, rect),
            self.sim_to_screen(self.sim.config().bounds, rect),
        );
        painter.rect_filled(surface, 0.0, egui::Color32::BLACK);

        for cmd in commands {
            match cmd {
                DrawCommand::FillRect { x, y, w, h, color } => {
                    let min = self.sim_to_screen(DVec2::new(*x, *y), rect);
                    let max = self.sim_to_screen(DVec2::new(x + w, y + h), rect);
                    painter.rect_filled(egui::Rect::from_two_pos(min, max), 0.0, to_color32(*color));
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    painter.circle_filled(
                        self.sim_to_screen(*center, rect),
                        *radius as f32 * scale,
                        to_color32(*color),
                    );
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    painter.line_segment(
                        [self.sim_to_screen(*from, rect), self.sim_to_screen(*to, rect)],
                        egui::Stroke::new(*width as f32 * scale.max(1.0), to_color32(*color)),
                    );
                }
                DrawCommand::Text {
                    pos, text, color, ..
                } => {
                    // Canvas text is anchored at its baseline on the left.
                    painter.text(
                        self.sim_to_screen(*pos, rect),
                        egui::Align2::LEFT_BOTTOM,
                        text,
                        egui::FontId::monospace(14.0 * scale),
                        to_color32(*color),
                    );
                }
            }
        }
    }

    /// Builds the central panel where the particle field is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            self.forward_input(ctx, &response, rect);

            if self.running {
                let now = ctx.input(|i| i.time) * 1000.0;
                self.last_frame = Some(self.sim.advance_frame(now));
                ctx.request_repaint();
            }

            if let Some(frame) = &self.last_frame {
                self.paint(&painter, rect, &frame.commands);
            }
        });
    }
}

/// Converts a draw-list colour to an egui colour.
pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(20.0, 10.0), egui::vec2(1000.0, 600.0))
    }

    #[test]
    fn sim_to_screen_and_back_is_roundtrip() {
        let viewer = Viewer::with_seed(SimConfig::default(), 1);
        let rect = test_rect();

        let sim_points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(800.0, 600.0),
            DVec2::new(123.5, 456.25),
        ];

        let eps = 1e-3;
        for p in sim_points {
            let screen = viewer.sim_to_screen(p, rect);
            let back = viewer.screen_to_sim(screen, rect);
            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn surface_is_centered_in_wide_rects() {
        let viewer = Viewer::with_seed(SimConfig::default(), 1);
        let rect = test_rect();

        // 1000x600 panel, 800x600 surface: scale 1, 100 px margin each side.
        let origin = viewer.sim_to_screen(DVec2::ZERO, rect);
        assert_eq!(origin, egui::pos2(120.0, 10.0));
        let corner = viewer.sim_to_screen(DVec2::new(800.0, 600.0), rect);
        assert_eq!(corner, egui::pos2(920.0, 610.0));
    }

    #[test]
    fn to_color32_matches_css_colours() {
        assert_eq!(
            to_color32(Color::hsl(120.0, 100.0, 50.0)),
            egui::Color32::from_rgb(0, 255, 0)
        );
        assert_eq!(
            to_color32(Color::rgba(255, 255, 255, 1.0)),
            egui::Color32::WHITE
        );
    }

    #[test]
    fn invalid_config_falls_back_to_default() {
        let mut cfg = SimConfig::default();
        cfg.max_population = 0;
        let viewer = Viewer::with_seed(cfg, 3);

        assert_eq!(viewer.cfg, SimConfig::default());
        assert_eq!(viewer.sim.system().len(), 100);
    }

    #[test]
    fn reset_applies_edited_config() {
        let mut viewer = Viewer::with_seed(SimConfig::default(), 4);
        viewer.cfg.initial_count = 12;
        viewer.last_frame = Some(viewer.sim.advance_frame(0.0));

        viewer.reset();

        assert_eq!(viewer.sim.system().len(), 12);
        assert!(viewer.last_frame.is_none());
    }

    #[test]
    fn lowering_the_cap_keeps_reset_valid() {
        let mut viewer = Viewer::with_seed(SimConfig::default(), 5);
        viewer.cfg.max_population = 40;
        Viewer::clamp_initial_count(&mut viewer.cfg);
        assert_eq!(viewer.cfg.initial_count, 40);

        viewer.reset();
        assert_eq!(viewer.sim.system().len(), 40);
    }

    #[test]
    fn same_seed_gives_same_initial_field() {
        let a = Viewer::with_seed(SimConfig::default(), 77);
        let b = Viewer::with_seed(SimConfig::default(), 77);
        assert_eq!(a.sim.system().particles(), b.sim.system().particles());
    }
}
