//! Hit-testing: find the topmost object under a pixeloid point.

use crate::coords::PixeloidPoint;
use crate::shapes::{GeometricObject, ObjectId};

pub use crate::shapes::HitTolerance;

/// Resolves pointer positions to stored objects.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitTester {
    pub tolerance: HitTolerance,
}

impl HitTester {
    pub fn new(tolerance: HitTolerance) -> Self {
        Self { tolerance }
    }

    /// Find the topmost visible object under `point`.
    ///
    /// Objects are tested back to front in reverse, so the last-drawn
    /// object wins where several overlap.
    pub fn hit_test(&self, point: PixeloidPoint, objects: &[GeometricObject]) -> Option<ObjectId> {
        objects
            .iter()
            .rev()
            .find(|object| self.hits(object, point))
            .map(GeometricObject::id)
    }

    /// All visible objects under `point`, topmost first.
    pub fn hits_at(&self, point: PixeloidPoint, objects: &[GeometricObject]) -> Vec<ObjectId> {
        objects
            .iter()
            .rev()
            .filter(|object| self.hits(object, point))
            .map(GeometricObject::id)
            .collect()
    }

    /// Whether `point` selects `object`. Hidden objects never match.
    pub fn hits(&self, object: &GeometricObject, point: PixeloidPoint) -> bool {
        if !object.is_visible() {
            return false;
        }
        let stroke_width = object.style.stroke_width;
        let slop = object.shape.hit_slop(&self.tolerance, stroke_width);
        // Cheap reject before the exact predicate
        if !object.bounds().inflate(slop).contains(point) {
            return false;
        }
        object.shape.contains(point, &self.tolerance, stroke_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{ObjectStore, ObjectUpdate};
    use crate::shapes::{ShapeKind, ShapeStyle};

    fn p(x: f64, y: f64) -> PixeloidPoint {
        PixeloidPoint::new(x, y)
    }

    fn add(store: &mut ObjectStore, kind: ShapeKind, vertices: Vec<PixeloidPoint>) -> ObjectId {
        store.add_object(kind, vertices, ShapeStyle::default()).unwrap()
    }

    #[test]
    fn test_point_halo() {
        let mut store = ObjectStore::new();
        let id = add(&mut store, ShapeKind::Point, vec![p(10.0, 10.0)]);
        let tester = HitTester::default();
        assert_eq!(tester.hit_test(p(12.0, 12.0), store.all_objects()), Some(id));
        assert_eq!(tester.hit_test(p(7.5, 10.0), store.all_objects()), None);
    }

    #[test]
    fn test_line_tolerance_scales_with_stroke() {
        let mut store = ObjectStore::new();
        let style = ShapeStyle { stroke_width: 10.0, ..ShapeStyle::default() };
        let thick = store
            .add_object(ShapeKind::Line, vec![p(0.0, 0.0), p(20.0, 0.0)], style)
            .unwrap();
        let thin = add(&mut store, ShapeKind::Line, vec![p(0.0, 50.0), p(20.0, 50.0)]);
        let tester = HitTester::default();

        assert_eq!(tester.hit_test(p(10.0, 4.5), store.all_objects()), Some(thick));
        assert_eq!(tester.hit_test(p(10.0, 5.5), store.all_objects()), None);
        // Hairline still gets the minimum tolerance
        assert_eq!(tester.hit_test(p(10.0, 52.0), store.all_objects()), Some(thin));
        assert_eq!(tester.hit_test(p(10.0, 52.5), store.all_objects()), None);
    }

    #[test]
    fn test_circle_interior() {
        let mut store = ObjectStore::new();
        let id = add(&mut store, ShapeKind::Circle, vec![p(0.0, 0.0), p(5.0, 0.0)]);
        let tester = HitTester::default();
        assert_eq!(tester.hit_test(p(1.0, 1.0), store.all_objects()), Some(id));
        assert_eq!(tester.hit_test(p(4.0, 4.0), store.all_objects()), None);
    }

    #[test]
    fn test_rectangle_direction_independent() {
        let mut forward = ObjectStore::new();
        let mut backward = ObjectStore::new();
        add(&mut forward, ShapeKind::Rectangle, vec![p(0.0, 0.0), p(10.0, 6.0)]);
        add(&mut backward, ShapeKind::Rectangle, vec![p(10.0, 6.0), p(0.0, 0.0)]);
        let tester = HitTester::default();

        for probe in [p(5.0, 3.0), p(0.0, 0.0), p(10.0, 6.0), p(10.5, 3.0), p(-1.0, -1.0)] {
            assert_eq!(
                tester.hit_test(probe, forward.all_objects()).is_some(),
                tester.hit_test(probe, backward.all_objects()).is_some()
            );
        }
        assert_eq!(forward.bounds(), backward.bounds());
    }

    #[test]
    fn test_diamond_center_and_corner() {
        let mut store = ObjectStore::new();
        let id = add(
            &mut store,
            ShapeKind::Diamond,
            vec![p(0.0, 5.0), p(5.0, 0.0), p(10.0, 5.0), p(5.0, 10.0)],
        );
        let tester = HitTester::default();
        assert_eq!(tester.hit_test(p(5.0, 5.0), store.all_objects()), Some(id));
        assert_eq!(tester.hit_test(p(0.0, 0.0), store.all_objects()), None);
    }

    #[test]
    fn test_topmost_wins() {
        let mut store = ObjectStore::new();
        let a = add(&mut store, ShapeKind::Rectangle, vec![p(0.0, 0.0), p(100.0, 100.0)]);
        let b = add(&mut store, ShapeKind::Rectangle, vec![p(50.0, 50.0), p(150.0, 150.0)]);
        let tester = HitTester::default();

        assert_eq!(tester.hit_test(p(75.0, 75.0), store.all_objects()), Some(b));
        assert_eq!(tester.hits_at(p(75.0, 75.0), store.all_objects()), vec![b, a]);
        assert_eq!(tester.hit_test(p(25.0, 25.0), store.all_objects()), Some(a));
    }

    #[test]
    fn test_hidden_objects_are_skipped() {
        let mut store = ObjectStore::new();
        let a = add(&mut store, ShapeKind::Rectangle, vec![p(0.0, 0.0), p(10.0, 10.0)]);
        let b = add(&mut store, ShapeKind::Rectangle, vec![p(0.0, 0.0), p(10.0, 10.0)]);
        store.update_object(b, ObjectUpdate::visibility(false)).unwrap();

        let tester = HitTester::default();
        assert_eq!(tester.hit_test(p(5.0, 5.0), store.all_objects()), Some(a));
    }

    #[test]
    fn test_custom_tolerance() {
        let mut store = ObjectStore::new();
        let id = add(&mut store, ShapeKind::Point, vec![p(0.0, 0.0)]);
        let tester = HitTester::new(HitTolerance { point_halo: 5.0, ..HitTolerance::default() });
        assert_eq!(tester.hit_test(p(4.0, -4.0), store.all_objects()), Some(id));
    }
}
