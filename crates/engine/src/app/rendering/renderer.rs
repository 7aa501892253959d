use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{CameraView, FrameView, ViewMarker};

use super::transform::{world_radius_to_px, world_to_screen, ProjectedPoint};
use super::{Viewport, MARKER_MAX_HALF_SIZE_PX, MARKER_MIN_HALF_SIZE_PX, VERTICAL_FOV_RADIANS};

const HORIZON_SHADE_STEP: u8 = 2;
const HORIZON_BAND_PX: u32 = 24;

#[derive(Debug, Clone, Copy)]
struct MarkerDraw {
    projected: ProjectedPoint,
    half_size: i32,
    color: [u8; 4],
    outline: Option<[u8; 4]>,
}

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    draw_list: Vec<MarkerDraw>,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
            draw_list: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_frame(&mut self, view: &FrameView) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        collect_sorted_marker_draws(&view.markers, &view.camera, self.viewport, &mut self.draw_list);

        let width = self.viewport.width;
        let height = self.viewport.height;
        let frame = self.pixels.frame_mut();
        clear_with_depth_bands(frame, width, view.clear_color);
        for draw in &self.draw_list {
            draw_square(
                frame,
                width,
                height,
                draw.projected.x,
                draw.projected.y,
                draw.half_size,
                draw.color,
            );
            if let Some(outline) = draw.outline {
                draw_square_outline(
                    frame,
                    width,
                    height,
                    draw.projected.x,
                    draw.projected.y,
                    draw.half_size + 3,
                    outline,
                );
            }
        }

        self.pixels.render()
    }
}

/// Far markers first so nearer ones paint over them.
fn collect_sorted_marker_draws(
    markers: &[ViewMarker],
    camera: &CameraView,
    viewport: Viewport,
    out: &mut Vec<MarkerDraw>,
) {
    out.clear();
    for marker in markers {
        let Some(projected) = world_to_screen(marker.position, camera, viewport, VERTICAL_FOV_RADIANS)
        else {
            continue;
        };
        let radius_px = world_radius_to_px(
            marker.radius_world,
            projected.depth,
            viewport,
            VERTICAL_FOV_RADIANS,
        );
        out.push(MarkerDraw {
            projected,
            half_size: (radius_px.round() as i32)
                .clamp(MARKER_MIN_HALF_SIZE_PX, MARKER_MAX_HALF_SIZE_PX),
            color: marker.color,
            outline: marker.outline,
        });
    }
    out.sort_by(|a, b| b.projected.depth.total_cmp(&a.projected.depth));
}

fn clear_with_depth_bands(frame: &mut [u8], width: u32, base: [u8; 4]) {
    if width == 0 {
        return;
    }
    for (row_index, row) in frame.chunks_exact_mut(width as usize * 4).enumerate() {
        let band = (row_index as u32 / HORIZON_BAND_PX).min(u8::MAX as u32) as u8;
        let shade = band.saturating_mul(HORIZON_SHADE_STEP);
        let color = [
            base[0].saturating_sub(shade),
            base[1].saturating_sub(shade),
            base[2].saturating_sub(shade),
            base[3],
        ];
        for pixel in row.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x as usize >= width {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

fn draw_square(
    frame: &mut [u8],
    width: u32,
    height: u32,
    cx: i32,
    cy: i32,
    half_size: i32,
    color: [u8; 4],
) {
    let top = (cy - half_size).max(0);
    let bottom = (cy + half_size).min(height as i32 - 1);
    let left = (cx - half_size).max(0);
    let right = (cx + half_size).min(width as i32 - 1);
    for y in top..=bottom {
        for x in left..=right {
            write_pixel_rgba_clipped(frame, width as usize, x, y, color);
        }
    }
}

fn draw_square_outline(
    frame: &mut [u8],
    width: u32,
    _height: u32,
    cx: i32,
    cy: i32,
    half_size: i32,
    color: [u8; 4],
) {
    let left = cx - half_size;
    let right = cx + half_size;
    let top = cy - half_size;
    let bottom = cy + half_size;

    for x in left..=right {
        write_pixel_rgba_clipped(frame, width as usize, x, top, color);
        write_pixel_rgba_clipped(frame, width as usize, x, bottom, color);
    }
    for y in top..=bottom {
        write_pixel_rgba_clipped(frame, width as usize, left, y, color);
        write_pixel_rgba_clipped(frame, width as usize, right, y, color);
    }
}
