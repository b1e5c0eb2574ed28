//=========================================================================
// Cursor Styling
//=========================================================================
//
// Colours and stroke layers for the glow trail and the cursor dot.
//
// The trail is stroked three times per segment, widest and faintest
// first, so the solid core ends up on top:
//
// ```text
//   outer glow  ░░░░░░░░░░░░░░░░   wide, low alpha
//   inner glow    ▒▒▒▒▒▒▒▒▒▒▒▒     medium
//   core            ████████       thin, near-opaque
// ```
//
//=========================================================================

//=== Rgba ================================================================

/// Straight (non-premultiplied) colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque colour from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same colour with alpha multiplied by `factor`.
    pub fn with_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation towards `other` (`t = 0` → self, `t = 1` → other).
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

//=== StrokeLayer =========================================================

/// One pass of the trail stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeLayer {
    /// Line width in logical pixels.
    pub width: f32,

    /// Alpha at full segment opacity.
    pub alpha: f32,
}

//=== TrailStyle ==========================================================

/// Appearance of the glow trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailStyle {
    /// Colour of the newest segments.
    pub head: Rgba,

    /// Colour the trail shifts towards as it ages.
    pub tail: Rgba,

    /// Drawn in order: outer glow, inner glow, core.
    pub layers: [StrokeLayer; 3],
}

impl TrailStyle {
    /// Colour of a segment given its normalized age and opacity.
    pub fn segment_color(&self, layer: &StrokeLayer, normalized_age: f32, opacity: f32) -> Rgba {
        self.head
            .lerp(self.tail, normalized_age)
            .with_alpha(layer.alpha * opacity)
    }
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            head: Rgba::from_hex(0x00e5ff),
            tail: Rgba::from_hex(0x8b5cf6),
            layers: [
                StrokeLayer { width: 14.0, alpha: 0.12 },
                StrokeLayer { width: 7.0, alpha: 0.35 },
                StrokeLayer { width: 2.0, alpha: 0.95 },
            ],
        }
    }
}

//=== DotStyle ============================================================

/// Appearance of the solid cursor dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    pub radius: f32,
    pub fill: Rgba,
    pub glow: Rgba,
    pub glow_radius: f32,
}

/// Dot styles for the idle and hover states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPalette {
    pub idle: DotStyle,
    pub hover: DotStyle,
}

impl CursorPalette {
    pub fn dot(&self, hovering_interactive: bool) -> &DotStyle {
        if hovering_interactive {
            &self.hover
        } else {
            &self.idle
        }
    }
}

impl Default for CursorPalette {
    fn default() -> Self {
        Self {
            idle: DotStyle {
                radius: 4.0,
                fill: Rgba::from_hex(0xe0f7ff),
                glow: Rgba::from_hex(0x00e5ff).with_alpha(0.45),
                glow_radius: 12.0,
            },
            hover: DotStyle {
                radius: 6.0,
                fill: Rgba::from_hex(0xffe4f3),
                glow: Rgba::from_hex(0xff3ea5).with_alpha(0.55),
                glow_radius: 18.0,
            },
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
