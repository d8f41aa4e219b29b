//! wirecore viewer
//!
//! Renders the demo scene into the software framebuffer and presents it
//! as a scaled texture.
//!
//! Controls:
//! - Tab: switch between orbit and walk camera
//! - Orbit: Left/Right to spin, Up/Down to zoom, Space to pause
//! - Walk: WASD to move, arrow keys to look
//! - F: toggle culling, B: toggle box style
//! - [ / ]: narrow / widen field of view
//! - F12: save a PNG snapshot

use std::path::Path;
use macroquad::prelude::*;
use wirecore::config::{load_config, save_config, RenderConfig};
use wirecore::rasterizer::{fast_sin, fast_cos, Camera, DrawList, Renderer, Vec3, HEIGHT, WIDTH};
use wirecore::world::{BoxStyle, Scene};
use wirecore::VERSION;

const CONFIG_PATH: &str = "wirecore.ron";

/// Commands per frame before the draw list starts refusing
const DRAW_LIST_LIMIT: usize = 20_000;

const EYE_HEIGHT: f32 = 1.6;
const WALK_SPEED: f32 = 6.0;
const LOOK_SPEED: f32 = 1.8;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("wirecore v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_or_create_config() -> RenderConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        let config = RenderConfig::default();
        if let Err(e) = save_config(&config, path) {
            log::warn!("Could not write default config to {}: {}", path.display(), e);
        }
        return config;
    }
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
            RenderConfig::default()
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CameraMode {
    Orbit,
    Walk,
}

struct Viewer {
    camera: Camera,
    mode: CameraMode,
    orbit_angle: f32,
    orbit_distance: f32,
    orbit_paused: bool,
    bob_phase: f32,
    cull: bool,
    snapshots: usize,
}

impl Viewer {
    fn new() -> Self {
        Self {
            camera: Camera::new(Vec3::new(0.0, 0.0, -18.0), 0.0, 0.0).with_height(EYE_HEIGHT),
            mode: CameraMode::Orbit,
            orbit_angle: 0.0,
            orbit_distance: 18.0,
            orbit_paused: false,
            bob_phase: 0.0,
            cull: true,
            snapshots: 0,
        }
    }

    fn update_orbit(&mut self, dt: f32) {
        if !self.orbit_paused {
            self.orbit_angle += dt * 0.25;
        }
        if is_key_down(KeyCode::Left) {
            self.orbit_angle -= dt;
        }
        if is_key_down(KeyCode::Right) {
            self.orbit_angle += dt;
        }
        if is_key_down(KeyCode::Up) {
            self.orbit_distance = (self.orbit_distance - dt * 10.0).max(4.0);
        }
        if is_key_down(KeyCode::Down) {
            self.orbit_distance = (self.orbit_distance + dt * 10.0).min(45.0);
        }

        self.camera.position = Vec3::new(
            fast_sin(self.orbit_angle) * self.orbit_distance,
            2.0,
            -fast_cos(self.orbit_angle) * self.orbit_distance,
        );
        self.camera.bob_x = 0.0;
        self.camera.bob_y = 0.0;
        self.camera.look_at(Vec3::ZERO);
    }

    fn update_walk(&mut self, dt: f32) {
        let mut d_yaw = 0.0;
        let mut d_pitch = 0.0;
        if is_key_down(KeyCode::Left) {
            d_yaw -= LOOK_SPEED * dt;
        }
        if is_key_down(KeyCode::Right) {
            d_yaw += LOOK_SPEED * dt;
        }
        if is_key_down(KeyCode::Up) {
            d_pitch += LOOK_SPEED * dt;
        }
        if is_key_down(KeyCode::Down) {
            d_pitch -= LOOK_SPEED * dt;
        }
        self.camera.rotate(d_pitch, d_yaw);

        let forward = self.camera.ground_forward();
        let right = Vec3::new(forward.z, 0.0, -forward.x);
        let mut movement = Vec3::ZERO;
        if is_key_down(KeyCode::W) {
            movement = movement + forward;
        }
        if is_key_down(KeyCode::S) {
            movement = movement - forward;
        }
        if is_key_down(KeyCode::D) {
            movement = movement + right;
        }
        if is_key_down(KeyCode::A) {
            movement = movement - right;
        }

        let movement = movement.normalize();
        if movement != Vec3::ZERO {
            self.camera.position = self.camera.position + movement * (WALK_SPEED * dt);
            self.bob_phase += dt * 10.0;
            self.camera.bob_y = fast_sin(self.bob_phase) * 0.08;
            self.camera.bob_x = fast_cos(self.bob_phase * 0.5) * 0.5;
        } else {
            // Settle back to rest
            self.camera.bob_y *= 0.85;
            self.camera.bob_x *= 0.85;
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = load_or_create_config();
    log::info!(
        "wirecore v{}: {}x{}, fov {}, near {}",
        VERSION, config.width, config.height, config.fov, config.near_plane
    );

    let mut renderer = Renderer::new(&config);
    let mut scene = Scene::demo();
    let mut viewer = Viewer::new();
    let mut list = DrawList::bounded(DRAW_LIST_LIMIT);
    let mut time = 0.0f32;

    loop {
        let dt = get_frame_time();
        time += dt;

        if is_key_pressed(KeyCode::Tab) {
            viewer.mode = match viewer.mode {
                CameraMode::Orbit => CameraMode::Walk,
                CameraMode::Walk => CameraMode::Orbit,
            };
        }
        if is_key_pressed(KeyCode::Space) {
            viewer.orbit_paused = !viewer.orbit_paused;
        }
        if is_key_pressed(KeyCode::F) {
            viewer.cull = !viewer.cull;
            log::info!("culling {}", if viewer.cull { "on" } else { "off" });
        }
        if is_key_pressed(KeyCode::B) {
            scene.box_style = match scene.box_style {
                BoxStyle::Wire => BoxStyle::Strokes,
                BoxStyle::Strokes => BoxStyle::Wire,
            };
        }
        if is_key_pressed(KeyCode::LeftBracket) {
            renderer.set_fov((renderer.fov() - 20.0).max(40.0));
        }
        if is_key_pressed(KeyCode::RightBracket) {
            renderer.set_fov((renderer.fov() + 20.0).min(800.0));
        }

        match viewer.mode {
            CameraMode::Orbit => viewer.update_orbit(dt),
            CameraMode::Walk => viewer.update_walk(dt),
        }

        list.clear();
        let collected = scene.collect(&renderer, &viewer.camera, time, &mut list, viewer.cull);
        let stats = renderer.render_frame(&viewer.camera, &list);
        log::debug!("{:?} {:?}", collected, stats);

        if is_key_pressed(KeyCode::F12) {
            viewer.snapshots += 1;
            let path = format!("wirecore-{:03}.png", viewer.snapshots);
            if let Err(e) = renderer.framebuffer().save_png(&path) {
                log::error!("Failed to save snapshot {}: {}", path, e);
            }
        }

        // Present, scaled to fit while keeping the aspect ratio
        clear_background(BLACK);
        let fb = renderer.framebuffer();
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let draw_w = fb.width as f32 * scale;
        let draw_h = fb.height as f32 * scale;
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) / 2.0,
            (screen_height() - draw_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "{} objects, {} culled | {} lines ({} clipped) {} tris | fov {:.0} | cull {}",
                collected.objects,
                collected.culled,
                stats.lines,
                stats.lines_clipped,
                stats.triangles,
                renderer.fov(),
                if viewer.cull { "on" } else { "off" },
            ),
            8.0,
            20.0,
            18.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await
    }
}
