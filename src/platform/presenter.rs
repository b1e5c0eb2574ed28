//=========================================================================
// Frame Presenter
//=========================================================================
//
// Copies the overlay's finished frame onto the window.
//
// The overlay draws into an in-memory RGBA surface with straight alpha.
// Each frame the presenter composites it over the page background and
// hands the result to softbuffer as `0x00RRGGBB` words.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::num::NonZeroU32;
use std::rc::Rc;

use winit::window::Window;

//=== Internal Dependencies ===============================================

use super::PlatformError;
use crate::core::cursor::DrawSurface;

//=== Constants ===========================================================

/// Page colour behind the trail.
pub(crate) const PAGE_BACKGROUND: [u8; 3] = [10, 10, 15];

//=== FramePresenter ======================================================

/// Puts a finished overlay frame on screen.
pub(crate) trait FramePresenter {
    fn present(&mut self, frame: &dyn DrawSurface) -> Result<(), PlatformError>;
}

//=== WindowPresenter =====================================================

/// softbuffer-backed presenter for a Winit window.
pub(crate) struct WindowPresenter {
    _context: softbuffer::Context<Rc<Window>>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    background: [u8; 3],
}

impl WindowPresenter {
    pub(crate) fn new(window: Rc<Window>) -> Result<Self, PlatformError> {
        let context = softbuffer::Context::new(window.clone()).map_err(presentation)?;
        let surface = softbuffer::Surface::new(&context, window).map_err(presentation)?;
        Ok(Self {
            _context: context,
            surface,
            background: PAGE_BACKGROUND,
        })
    }
}

impl FramePresenter for WindowPresenter {
    fn present(&mut self, frame: &dyn DrawSurface) -> Result<(), PlatformError> {
        let (width, height) = frame.size();
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        let Some(pixels) = frame.rgba_frame() else {
            return Ok(());
        };

        self.surface.resize(w, h).map_err(presentation)?;
        let mut buffer = self.surface.buffer_mut().map_err(presentation)?;
        for (dst, src) in buffer.iter_mut().zip(pixels) {
            *dst = compose_pixel(*src, self.background);
        }
        buffer.present().map_err(presentation)
    }
}

//=== Helpers =============================================================

/// Source-over of a straight-alpha pixel onto an opaque background,
/// packed as `0x00RRGGBB`.
pub(crate) fn compose_pixel(src: [u8; 4], background: [u8; 3]) -> u32 {
    let alpha = u32::from(src[3]);
    let channel = |i: usize| {
        let fg = u32::from(src[i]) * alpha;
        let bg = u32::from(background[i]) * (255 - alpha);
        (fg + bg + 127) / 255
    };
    (channel(0) << 16) | (channel(1) << 8) | channel(2)
}

fn presentation(e: softbuffer::SoftBufferError) -> PlatformError {
    PlatformError::Presentation(Box::new(e))
}

//=========================================================================
// Tests
//=========================================================================
