//! Atom Visualizer
//!
//! Photon interactions and radioactive decay on a 3D atom model.
//!
//! Controls:
//! - Arrow keys / right-drag: Rotate view
//! - Scroll: Zoom
//! - L: Toggle light
//! - P: Toggle photon mode
//! - D: Toggle decay mode
//! - A: Toggle auto-decay
//! - R: Reset atom
//!
//! Set `ATOM_LAB_ATOM`, `ATOM_LAB_TIME_SPEED` or `ATOM_LAB_STRICT` to change
//! the starting configuration, and `RUST_LOG` for log output.

mod equations_ui;
mod panels;
mod scene;

use atom_sim::animation::ParticleAnimator;
use atom_sim::config::SimConfig;
use atom_sim::interaction::PhotonSource;
use atom_sim::scheduler::DecayScheduler;
use atom_sim::store::SimulationStore;
use common::GraphicsContext;
use equations_ui::draw_equations_sidebar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::AtomScene;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    config: SimConfig,
    store: SimulationStore,
    scheduler: DecayScheduler,
    source: PhotonSource,
    animator: ParticleAnimator,
    scene: AtomScene,
    rng: StdRng,
    /// Presentation clock in seconds
    clock: f64,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, config: SimConfig) -> Self {
        let store = SimulationStore::new(&config);
        let scheduler = DecayScheduler::new(config.tick_interval);
        let scene = AtomScene::new(ctx.aspect_ratio());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            config,
            store,
            scheduler,
            source: PhotonSource::new(),
            animator: ParticleAnimator::new(),
            scene,
            rng: StdRng::from_entropy(),
            clock: 0.0,
            dragging: false,
            last_cursor: None,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.scene.camera.update_aspect_ratio(self.ctx.aspect_ratio());
    }

    /// Hand queued store notifications to the animator
    fn dispatch_events(&mut self) {
        let events = self.store.drain_events();
        if !events.is_empty() {
            log::trace!("Dispatching {} store events", events.len());
            self.animator.handle_events(&events, self.clock);
        }
    }

    fn update(&mut self, dt: f32) {
        self.clock += dt as f64;
        self.scene.advance(dt);

        // UI input from the previous frame lands first
        self.dispatch_events();

        self.scheduler.update(&mut self.store, dt as f64, &mut self.rng, self.clock);
        self.dispatch_events();

        self.source.update(&mut self.store, dt as f64, &mut self.rng, self.clock);
        self.dispatch_events();

        self.animator.update(&mut self.store, &mut self.rng, self.clock);
        self.dispatch_events();
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let tick_seconds = self.config.tick_interval.as_secs_f64();
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            panels::draw_atom_selector(ctx, &mut self.store);
            draw_equations_sidebar(ctx, &self.store, tick_seconds);
            panels::draw_photon_controls(ctx, &mut self.store);
            panels::draw_photon_info(ctx, &self.store);
            panels::draw_decay_controls(ctx, &mut self.store, &mut self.rng, self.clock);

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    let rect = ui.max_rect();
                    self.scene.paint(ui.painter(), rect, &self.store, self.clock);
                });
        });

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.ctx.clear_pass(&mut encoder, &view);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::KeyL => self.store.toggle_light(),
            KeyCode::KeyP => self.store.toggle_photon_mode(),
            KeyCode::KeyD => self.store.toggle_decay_mode(),
            KeyCode::KeyA => self.store.toggle_auto_decay(),
            KeyCode::KeyR => self.store.reset_atom(),
            KeyCode::ArrowLeft => self.scene.camera.orbit(-0.1, 0.0),
            KeyCode::ArrowRight => self.scene.camera.orbit(0.1, 0.0),
            KeyCode::ArrowUp => self.scene.camera.orbit(0.0, 0.1),
            KeyCode::ArrowDown => self.scene.camera.orbit(0.0, -0.1),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.scene.camera.zoom(delta * 2.0);
    }

    fn handle_cursor(&mut self, x: f64, y: f64) {
        if self.dragging {
            if let Some((lx, ly)) = self.last_cursor {
                let dx = (x - lx) as f32 * 0.005;
                let dy = (y - ly) as f32 * 0.005;
                self.scene.camera.orbit(-dx, dy);
            }
        }
        self.last_cursor = Some((x, y));
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn main() {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Atom Visualizer - Photons & Radioactive Decay",
        1440,
        900,
    ));

    let config = SimConfig::from_env();
    log::info!("Starting with {} ({} years/sec)", config.initial_atom, config.time_speed);

    let mut app = App::new(ctx, config);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => app.resize(*size),
                        WindowEvent::RedrawRequested => {
                            let now = std::time::Instant::now();
                            let dt = (now - last_time).as_secs_f32().min(0.1);
                            last_time = now;

                            app.update(dt);
                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => log::error!("Render error: {:?}", e),
                            }
                        }
                        _ if consumed => {}
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key),
                                    state,
                                    ..
                                },
                            ..
                        } => app.handle_key(*key, *state),
                        WindowEvent::MouseWheel { delta, .. } => {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => *y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            app.handle_scroll(scroll);
                        }
                        WindowEvent::MouseInput {
                            button: MouseButton::Right,
                            state,
                            ..
                        } => app.dragging = *state == ElementState::Pressed,
                        WindowEvent::CursorMoved { position, .. } => {
                            app.handle_cursor(position.x, position.y)
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
