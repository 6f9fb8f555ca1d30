//! tinyframe: software rasterizer for textured OBJ meshes
//!
//! Renders one still frame: mesh and texture are loaded up front, every
//! face is projected and rasterized with z-buffer visibility and a single
//! directional light, then the finished image is gamma-corrected, flipped,
//! and presented.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod model;
mod rasterizer;
mod scene;

use macroquad::prelude::*;
use model::{Mesh, MeshError};
use rasterizer::{projection, viewport, Framebuffer, ScreenTransform, Texture, ZBuffer};
use rasterizer::{HEIGHT, WIDTH};
use scene::RenderConfig;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("tinyframe v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Load mesh, texture, and optional config before any rendering starts.
/// Any failure here aborts the run; the rasterizer never sees partial input.
fn load_inputs() -> Result<(Mesh, Texture, RenderConfig), String> {
    let mut args = std::env::args().skip(1);
    let mesh_path = args.next().unwrap_or_else(|| "assets/head.obj".to_string());
    let texture_path = args
        .next()
        .unwrap_or_else(|| "assets/head_diffuse.png".to_string());

    let config = match args.next() {
        Some(path) => scene::load_config(&path)
            .map_err(|e| format!("Failed to load config {}: {}", path, e))?,
        None => RenderConfig::default(),
    };

    let mesh =
        Mesh::from_file(&mesh_path).map_err(|e| format!("Failed to load mesh {}: {}", mesh_path, e))?;
    let texture = Texture::from_file(&texture_path)?;

    Ok((mesh, texture, config))
}

/// Run the full render pass: background gradient, per-face rasterization,
/// gamma correction, vertical flip.
fn render_frame(
    mesh: &Mesh,
    texture: &Texture,
    config: &RenderConfig,
) -> Result<Framebuffer, MeshError> {
    let mut fb = Framebuffer::new(WIDTH, HEIGHT);

    let span = (fb.width + fb.height) as f32;
    let (primary, secondary) = (config.background_primary, config.background_secondary);
    fb.fill_with(|x, y| {
        let t = (x + y) as f32 / span;
        rasterizer::Color::lerp(t, primary, secondary)
    });

    let mut zbuf = ZBuffer::for_framebuffer(&fb);
    let transform = ScreenTransform::new(
        projection(config.camera_distance),
        viewport(0.0, 0.0, fb.width as f32, fb.height as f32, config.depth_range),
    );

    rasterizer::render_mesh(&mut fb, &mut zbuf, mesh, texture, &transform, config)?;

    fb.gamma_correct(config.gamma);
    fb.flip_vertical();
    Ok(fb)
}

#[macroquad::main(window_conf)]
async fn main() {
    let (mesh, texture, config) = match load_inputs() {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    println!("Found {} vertices.", mesh.vertices.len());
    println!("Found {} faces.", mesh.faces.len());

    let fb = match render_frame(&mesh, &texture, &config) {
        Ok(fb) => fb,
        Err(e) => {
            eprintln!("Render aborted: {}", e);
            return;
        }
    };
    println!("Finished rendering");

    let frame = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    frame.set_filter(FilterMode::Nearest);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        clear_background(BLACK);

        // Scale the frame to fit the window, centered
        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let w = fb.width as f32 * scale;
        let h = fb.height as f32 * scale;
        draw_texture_ex(
            &frame,
            (screen_width() - w) / 2.0,
            (screen_height() - h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(w, h)),
                ..Default::default()
            },
        );

        next_frame().await
    }
}
