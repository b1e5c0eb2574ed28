//=========================================================================
// Pointer Processor
//=========================================================================
//
// Converts Winit cursor and window events into `PointerEvent`s.
//
// Architecture:
//   Winit Events → PointerProcessor → PointerEvent → PointerListeners
//
// Stateful viewport tracking: caches the scale factor and physical size
// so cursor positions can be reported in logical pixels and a scale
// change can be re-announced as a resize. Every move is hit-tested to
// attach the target's role ancestry.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton},
};

//=== Internal Dependencies ===============================================

use crate::core::pointer::{HitTester, PointerEvent};
use crate::core::time::Timestamp;

//=== PointerProcessor ====================================================

/// Converts Winit events to pointer events with cached viewport state.
pub(crate) struct PointerProcessor {
    hit_tester: Box<dyn HitTester>,
    scale_factor: f64,
    size: PhysicalSize<u32>,
}

impl PointerProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(hit_tester: Box<dyn HitTester>) -> Self {
        Self {
            hit_tester,
            scale_factor: 1.0,
            size: PhysicalSize::new(0, 0),
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a physical cursor position to a logical-pixel move event.
    pub(crate) fn process_cursor_moved(
        &self,
        position: PhysicalPosition<f64>,
        at: Timestamp,
    ) -> PointerEvent {
        let logical = position.to_logical::<f32>(self.scale_factor);
        PointerEvent::Moved {
            x: logical.x,
            y: logical.y,
            target: self.hit_tester.ancestry(logical.x, logical.y),
            at,
        }
    }

    /// Records the new physical size and reports it.
    pub(crate) fn process_resized(&mut self, size: PhysicalSize<u32>) -> PointerEvent {
        self.size = size;
        self.viewport_event()
    }

    /// Records a DPI change; the viewport is re-announced at the new scale.
    pub(crate) fn process_scale_factor(&mut self, scale_factor: f64) -> PointerEvent {
        self.scale_factor = scale_factor;
        self.viewport_event()
    }

    /// Returns `true` for a primary-button press.
    pub(crate) fn is_primary_press(button: MouseButton, state: ElementState) -> bool {
        button == MouseButton::Left && state == ElementState::Pressed
    }

    //--- Internal Helpers -------------------------------------------------

    fn viewport_event(&self) -> PointerEvent {
        PointerEvent::Resized {
            width: self.size.width,
            height: self.size.height,
            scale_factor: self.scale_factor,
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[cfg(test)]
    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::{ElementRole, NoHitTargets, Rect, RegionHitTester};

    fn with_regions() -> PointerProcessor {
        let mut regions = RegionHitTester::new();
        let nav = regions.add_region(Rect::new(0.0, 0.0, 400.0, 40.0), ElementRole::Generic);
        regions.add_child(nav, Rect::new(10.0, 5.0, 60.0, 30.0), ElementRole::Button);
        PointerProcessor::new(Box::new(regions))
    }

    #[test]
    fn starts_at_unit_scale() {
        let processor = PointerProcessor::new(Box::new(NoHitTargets));
        assert_eq!(processor.scale_factor(), 1.0);
        assert_eq!(processor.size(), PhysicalSize::new(0, 0));
    }

    #[test]
    fn cursor_move_is_hit_tested() {
        let processor = with_regions();
        let event = processor.process_cursor_moved(PhysicalPosition::new(20.0, 10.0), Timestamp::ZERO);

        match event {
            PointerEvent::Moved { x, y, target, .. } => {
                assert_eq!((x, y), (20.0, 10.0));
                assert_eq!(target, vec![ElementRole::Button, ElementRole::Generic]);
            }
            other => panic!("Expected Moved, got {:?}", other),
        }
    }

    #[test]
    fn cursor_move_is_reported_in_logical_pixels() {
        let mut processor = with_regions();
        processor.process_scale_factor(2.0);

        let event = processor.process_cursor_moved(PhysicalPosition::new(40.0, 20.0), Timestamp::ZERO);

        match event {
            PointerEvent::Moved { x, y, target, .. } => {
                assert_eq!((x, y), (20.0, 10.0));
                assert_eq!(target.first(), Some(&ElementRole::Button));
            }
            other => panic!("Expected Moved, got {:?}", other),
        }
    }

    #[test]
    fn resize_then_scale_change_reannounces_viewport() {
        let mut processor = PointerProcessor::new(Box::new(NoHitTargets));

        let resized = processor.process_resized(PhysicalSize::new(800, 600));
        assert_eq!(
            resized,
            PointerEvent::Resized { width: 800, height: 600, scale_factor: 1.0 }
        );

        let rescaled = processor.process_scale_factor(1.5);
        assert_eq!(
            rescaled,
            PointerEvent::Resized { width: 800, height: 600, scale_factor: 1.5 }
        );
    }

    #[test]
    fn only_left_press_is_primary() {
        assert!(PointerProcessor::is_primary_press(MouseButton::Left, ElementState::Pressed));
        assert!(!PointerProcessor::is_primary_press(MouseButton::Left, ElementState::Released));
        assert!(!PointerProcessor::is_primary_press(MouseButton::Right, ElementState::Pressed));
    }
}
