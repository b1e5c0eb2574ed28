//=========================================================================
// Drawing Surface
//=========================================================================
//
// Minimal 2D drawing contract used by the cursor renderer, plus a
// software implementation.
//
// All coordinates and sizes passed to a `DrawSurface` are physical
// pixels; the renderer applies the viewport scale factor before drawing,
// so the trail is always rasterized at native resolution.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::style::Rgba;

//=== DrawSurface =========================================================

/// Overlay surface the cursor renderer draws into every frame.
pub trait DrawSurface {
    /// Current size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Reallocates the surface. Contents after a resize are unspecified
    /// until the next `clear()`.
    fn resize(&mut self, width: u32, height: u32);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    /// Strokes a line with round caps.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba);

    /// Fills a disc.
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba);

    /// Row-major RGBA8 contents, straight alpha, for surfaces that keep
    /// their frame in memory. `None` when the surface draws elsewhere.
    fn rgba_frame(&self) -> Option<&[[u8; 4]]> {
        None
    }
}

//=== PixelSurface ========================================================

/// Software RGBA8 surface with anti-aliased strokes and source-over blending.
///
/// Hosts that present raw pixel buffers (the bundled window, a texture
/// upload, a PNG dump) read the frame through [`pixels`](Self::pixels).
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; (width as usize) * (height as usize)],
        }
    }

    /// Row-major RGBA8 pixels, straight alpha.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + x as usize])
    }

    //--- Rasterization ----------------------------------------------------

    /// Visits every pixel centre inside the padded bounding box and blends
    /// `color` with the coverage returned by `coverage(px, py)`.
    fn shade<F>(&mut self, min: (f32, f32), max: (f32, f32), color: Rgba, coverage: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        if self.width == 0 || self.height == 0 || color.a <= 0.0 {
            return;
        }

        let x0 = min.0.floor().max(0.0) as u32;
        let y0 = min.1.floor().max(0.0) as u32;
        let x1 = (max.0.ceil().max(0.0) as u32).min(self.width - 1);
        let y1 = (max.1.ceil().max(0.0) as u32).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                let cov = coverage(x as f32 + 0.5, y as f32 + 0.5);
                if cov > 0.0 {
                    let index = (y as usize) * (self.width as usize) + x as usize;
                    self.pixels[index] = blend(self.pixels[index], color, cov);
                }
            }
        }
    }
}

impl DrawSurface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width as usize) * (height as usize), [0; 4]);
    }

    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    fn rgba_frame(&self) -> Option<&[[u8; 4]]> {
        Some(&self.pixels)
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        let half = width * 0.5;
        let pad = half + 1.0;
        let min = (from.0.min(to.0) - pad, from.1.min(to.1) - pad);
        let max = (from.0.max(to.0) + pad, from.1.max(to.1) + pad);

        self.shade(min, max, color, |px, py| {
            edge_coverage(half - distance_to_segment((px, py), from, to))
        });
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba) {
        let pad = radius + 1.0;
        let min = (center.0 - pad, center.1 - pad);
        let max = (center.0 + pad, center.1 + pad);

        self.shade(min, max, color, |px, py| {
            let d = ((px - center.0).powi(2) + (py - center.1).powi(2)).sqrt();
            edge_coverage(radius - d)
        });
    }
}

//=========================================================================
// Raster Helpers
//=========================================================================

/// One-pixel linear ramp centred on the shape edge.
fn edge_coverage(signed_distance: f32) -> f32 {
    (signed_distance + 0.5).clamp(0.0, 1.0)
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let ab = (b.0 - a.0, b.1 - a.1);
    let ap = (p.0 - a.0, p.1 - a.1);
    let len_sq = ab.0 * ab.0 + ab.1 * ab.1;
    let t = if len_sq > 0.0 {
        ((ap.0 * ab.0 + ap.1 * ab.1) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = (a.0 + ab.0 * t, a.1 + ab.1 * t);
    ((p.0 - closest.0).powi(2) + (p.1 - closest.1).powi(2)).sqrt()
}

/// Source-over blend of `src` (scaled by `coverage`) onto a straight-alpha pixel.
fn blend(dst: [u8; 4], src: Rgba, coverage: f32) -> [u8; 4] {
    let sa = (src.a * coverage).clamp(0.0, 1.0);
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0; 4];
    }

    let channel = |s: f32, d: u8| {
        let d = d as f32 / 255.0;
        let c = (s * sa + d * da * (1.0 - sa)) / out_a;
        (c.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    [
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================
