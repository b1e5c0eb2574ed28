//=========================================================================
// Hit Testing
//=========================================================================
//
// Resolves a pointer position to the ancestry of the element under it.
//
// Hosts with a real element tree (a DOM, an immediate-mode UI) implement
// `HitTester` themselves. `RegionHitTester` covers the simple case of a
// static layout made of nested rectangles.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ElementRole;

//=== HitTester ===========================================================

/// Maps a viewport position to the roles of the element under it.
pub trait HitTester {
    /// Returns the target's role first, then each ancestor's, outward.
    /// Empty when nothing is under the pointer.
    fn ancestry(&self, x: f32, y: f32) -> Vec<ElementRole>;
}

/// Hit tester for hosts without an element tree; nothing is interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHitTargets;

impl HitTester for NoHitTargets {
    fn ancestry(&self, _x: f32, _y: f32) -> Vec<ElementRole> {
        Vec::new()
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

//=== RegionHitTester =====================================================

/// Identifier of a region inside a [`RegionHitTester`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

#[derive(Debug, Clone)]
struct Region {
    bounds: Rect,
    role: ElementRole,
    parent: Option<RegionId>,
}

/// Static layout of nested rectangles.
///
/// When regions overlap, the one added last wins, matching paint order.
#[derive(Debug, Clone, Default)]
pub struct RegionHitTester {
    regions: Vec<Region>,
}

impl RegionHitTester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level region.
    pub fn add_region(&mut self, bounds: Rect, role: ElementRole) -> RegionId {
        self.push(bounds, role, None)
    }

    /// Adds a region nested inside `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tester.
    pub fn add_child(&mut self, parent: RegionId, bounds: Rect, role: ElementRole) -> RegionId {
        assert!(parent.0 < self.regions.len(), "Unknown parent region {:?}", parent);
        self.push(bounds, role, Some(parent))
    }

    fn push(&mut self, bounds: Rect, role: ElementRole, parent: Option<RegionId>) -> RegionId {
        self.regions.push(Region { bounds, role, parent });
        RegionId(self.regions.len() - 1)
    }
}

impl HitTester for RegionHitTester {
    fn ancestry(&self, x: f32, y: f32) -> Vec<ElementRole> {
        let target = self
            .regions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, region)| region.bounds.contains(x, y))
            .map(|(index, _)| index);

        let mut chain = Vec::new();
        let mut cursor = target;
        while let Some(index) = cursor {
            let region = &self.regions[index];
            chain.push(region.role);
            cursor = region.parent.map(|p| p.0);
        }
        chain
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::is_interactive;

    fn layout() -> RegionHitTester {
        let mut tester = RegionHitTester::new();
        let nav = tester.add_region(Rect::new(0.0, 0.0, 800.0, 60.0), ElementRole::Generic);
        let button = tester.add_child(nav, Rect::new(700.0, 10.0, 40.0, 40.0), ElementRole::Button);
        tester.add_child(button, Rect::new(710.0, 20.0, 20.0, 20.0), ElementRole::Generic);
        tester.add_region(Rect::new(0.0, 60.0, 800.0, 540.0), ElementRole::Generic);
        tester
    }

    #[test]
    fn empty_outside_every_region() {
        let tester = layout();
        assert!(tester.ancestry(900.0, 900.0).is_empty());
    }

    #[test]
    fn icon_inside_button_reports_full_chain() {
        let tester = layout();
        let chain = tester.ancestry(715.0, 25.0);
        assert_eq!(
            chain,
            vec![ElementRole::Generic, ElementRole::Button, ElementRole::Generic]
        );
        assert!(is_interactive(&chain));
    }

    #[test]
    fn plain_section_is_not_interactive() {
        let tester = layout();
        let chain = tester.ancestry(100.0, 300.0);
        assert_eq!(chain, vec![ElementRole::Generic]);
        assert!(!is_interactive(&chain));
    }

    #[test]
    fn rect_edges_are_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(!rect.contains(10.0, 5.0));
        assert!(!rect.contains(5.0, 10.0));
    }

    #[test]
    fn no_hit_targets_is_always_empty() {
        assert!(NoHitTargets.ancestry(1.0, 1.0).is_empty());
    }

    #[test]
    #[should_panic(expected = "Unknown parent region")]
    fn unknown_parent_panics() {
        let mut tester = RegionHitTester::new();
        tester.add_child(RegionId(3), Rect::new(0.0, 0.0, 1.0, 1.0), ElementRole::Button);
    }
}
