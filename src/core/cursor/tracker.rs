//=========================================================================
// Pointer Tracker
//=========================================================================
//
// Pointer state for the glow trail: sampling, hover classification,
// viewport visibility and per-frame rendering.
//
// Architecture:
//   PointerEvent → handle() → TrailHistory + CursorVisualState + Viewport
//                                      ↓
//   FrameTime ───→ render() → purge → clear → 3-layer strokes → dot
//
// Positions are kept in logical pixels and scaled to physical pixels
// when drawing.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::style::{CursorPalette, TrailStyle};
use super::surface::DrawSurface;
use super::trail::{TrailHistory, DEFAULT_MAX_AGE_MS};
use crate::core::pointer::{is_interactive, PointerEvent};
use crate::core::time::Timestamp;

//=== TrailConfig =========================================================

/// Tunables for the pointer trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailConfig {
    /// Retention window in milliseconds.
    pub max_age_ms: f64,
    pub style: TrailStyle,
    pub palette: CursorPalette,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_age_ms: DEFAULT_MAX_AGE_MS,
            style: TrailStyle::default(),
            palette: CursorPalette::default(),
        }
    }
}

//=== CursorVisualState ===================================================

/// Cursor dot state, recomputed on every pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorVisualState {
    /// Last pointer position in logical pixels.
    pub position: (f32, f32),

    /// Whether the pointer is over a button-like element or its descendant.
    pub hovering_interactive: bool,
}

//=== Viewport ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    width: u32,
    height: u32,
    scale_factor: f64,
}

//=== PointerTracker ======================================================

/// Trail and cursor-dot state for one overlay.
pub struct PointerTracker {
    trail: TrailHistory,
    style: TrailStyle,
    palette: CursorPalette,
    cursor: CursorVisualState,
    has_position: bool,
    visible: bool,
    viewport: Option<Viewport>,
}

impl PointerTracker {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            trail: TrailHistory::new(config.max_age_ms),
            style: config.style,
            palette: config.palette,
            cursor: CursorVisualState::default(),
            has_position: false,
            visible: true,
            viewport: None,
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Applies one pointer or viewport event.
    pub fn handle(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Moved { x, y, target, at } => {
                self.trail.push(*x, *y, *at);
                let hovering = is_interactive(target);
                if hovering != self.cursor.hovering_interactive {
                    trace!(target: "cursor", "Hover changed: {}", hovering);
                }
                self.cursor = CursorVisualState {
                    position: (*x, *y),
                    hovering_interactive: hovering,
                };
                self.has_position = true;
            }

            PointerEvent::Left => {
                debug!(target: "cursor", "Pointer left viewport, hiding cursor");
                self.visible = false;
            }

            PointerEvent::Entered => {
                debug!(target: "cursor", "Pointer entered viewport");
                self.visible = true;
            }

            PointerEvent::Resized { width, height, scale_factor } => {
                debug!(
                    target: "cursor",
                    "Viewport resized to {}x{} @ {}x",
                    width, height, scale_factor
                );
                self.viewport = Some(Viewport {
                    width: *width,
                    height: *height,
                    scale_factor: *scale_factor,
                });
            }
        }
    }

    //--- Rendering --------------------------------------------------------

    /// Purges expired samples and redraws the whole overlay.
    ///
    /// Without a surface only the purge runs, so memory stays bounded even
    /// when the host cannot draw.
    pub fn render(&mut self, now: Timestamp, surface: Option<&mut (dyn DrawSurface + '_)>) {
        let purged = self.trail.purge(now);
        if purged > 0 {
            trace!(target: "cursor", "Purged {} trail points, {} live", purged, self.trail.len());
        }

        let Some(surface) = surface else {
            return;
        };

        if let Some(viewport) = self.viewport {
            if surface.size() != (viewport.width, viewport.height) {
                surface.resize(viewport.width, viewport.height);
            }
        }

        surface.clear();
        if !self.visible {
            return;
        }

        let scale = self.scale_factor() as f32;
        let to_physical = |p: (f32, f32)| (p.0 * scale, p.1 * scale);

        for segment in self.trail.segments(now) {
            for layer in &self.style.layers {
                let color = self
                    .style
                    .segment_color(layer, segment.normalized_age, segment.opacity);
                surface.stroke_line(
                    to_physical(segment.from),
                    to_physical(segment.to),
                    layer.width * scale,
                    color,
                );
            }
        }

        if self.has_position {
            let dot = self.palette.dot(self.cursor.hovering_interactive);
            let center = to_physical(self.cursor.position);
            surface.fill_circle(center, dot.glow_radius * scale, dot.glow);
            surface.fill_circle(center, dot.radius * scale, dot.fill);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn cursor(&self) -> CursorVisualState {
        self.cursor
    }

    /// `false` between a `Left` and the next `Entered`.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opacity applied to the dot and trail as a whole.
    pub fn overlay_opacity(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn trail(&self) -> &TrailHistory {
        &self.trail
    }

    fn scale_factor(&self) -> f64 {
        self.viewport.map(|v| v.scale_factor).unwrap_or(1.0)
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
