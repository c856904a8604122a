use serde::{Deserialize, Serialize};

use super::point::{Point3D, PointTable, Vector3f};
use super::reference::{Reference, ReferenceId, ReferenceTable};

/// A reference table plus a point table, loaded and saved as one unit.
///
/// Points carry only a [`ReferenceId`]; use [`PointCloudMap::resolve`] to
/// join a point with its reference. Ids without a matching reference are
/// legal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloudMap {
    pub references: ReferenceTable,
    pub points: PointTable,
}

impl PointCloudMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reference(
        &mut self,
        id: impl Into<ReferenceId>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        self.insert_reference(id.into(), Reference::new(kind, value))
    }

    pub fn insert_reference(&mut self, id: ReferenceId, reference: Reference) -> bool {
        self.references.insert(id, reference)
    }

    /// Appends a point. Always succeeds; `id` is not checked against the
    /// reference table.
    pub fn add_point(&mut self, id: impl Into<ReferenceId>, position: impl Into<Vector3f>) -> bool {
        self.points.insert(Point3D::new(id, position));
        true
    }

    pub fn point(&self, index: usize) -> Option<&Point3D> {
        self.points.get(index)
    }

    pub fn point_at(&self, position: &Vector3f) -> Option<&Point3D> {
        self.points.get_by_position(position)
    }

    pub fn resolve(&self, point: &Point3D) -> Option<&Reference> {
        self.references.get(&point.reference)
    }

    /// Points whose id has no entry in the reference table.
    pub fn dangling_points(&self) -> impl Iterator<Item = &Point3D> {
        self.points
            .iter()
            .filter(|point| !self.references.contains(&point.reference))
    }

    /// Moves `other` into this map. References already present here are kept
    /// and the rejected ids are returned; points are appended in order.
    pub fn merge(&mut self, other: PointCloudMap) -> Vec<ReferenceId> {
        let mut rejected = Vec::new();
        for (id, reference) in other.references {
            if !self.references.contains(&id) {
                self.references.insert(id, reference);
            } else {
                rejected.push(id);
            }
        }
        for point in other.points {
            self.points.insert(point);
        }
        rejected
    }

    pub fn clear(&mut self) {
        self.references.clear();
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_reference_is_rejected() {
        let mut map = PointCloudMap::new();
        assert!(map.add_reference("a", "t1", "v1"));
        assert!(!map.add_reference("a", "t2", "v2"));

        assert_eq!(
            map.references.entries(),
            vec![(ReferenceId::new("a"), Reference::new("t1", "v1"))]
        );
    }

    #[test]
    fn points_keep_multiplicity() {
        let mut map = PointCloudMap::new();
        assert!(map.add_point("a", [0.0, 0.0, 0.0]));
        assert!(map.add_point("a", [0.0, 0.0, 0.0]));

        assert_eq!(map.points.len(), 2);
        assert_eq!(map.points.find_index(&Vector3f::default()), Some(0));
    }

    #[test]
    fn lookup_by_index_and_position() {
        let mut map = PointCloudMap::new();
        map.add_point("terrain", [1.0, 2.0, 3.0]);
        map.add_point("terrain", [4.0, 5.0, 6.0]);

        assert_eq!(map.point(1).unwrap().position, Vector3f::new(4.0, 5.0, 6.0));
        assert!(map.point(2).is_none());
        assert_eq!(
            map.point_at(&Vector3f::new(4.0, 5.0, 6.0)),
            map.point(1)
        );
        assert_eq!(
            map.point_at(&Vector3f::new(1.0, 2.0, 3.0)),
            map.point(0)
        );
    }

    #[test]
    fn dangling_ids_are_allowed() {
        let mut map = PointCloudMap::new();
        map.add_reference("terrain", "material", "grass");
        map.add_point("terrain", [0.0, 0.0, 0.0]);
        map.add_point("tree_12", [1.0, 0.0, 0.0]);

        let resolved = map.resolve(map.point(0).unwrap()).unwrap();
        assert_eq!(resolved, &Reference::new("material", "grass"));
        assert!(map.resolve(map.point(1).unwrap()).is_none());

        let dangling: Vec<&str> = map
            .dangling_points()
            .map(|p| p.reference.as_str())
            .collect();
        assert_eq!(dangling, vec!["tree_12"]);
    }

    #[test]
    fn merge_keeps_existing_references() {
        let mut base = PointCloudMap::new();
        base.add_reference("a", "t1", "v1");
        base.add_point("a", [1.0, 1.0, 1.0]);

        let mut other = PointCloudMap::new();
        other.add_reference("a", "t2", "v2");
        other.add_reference("b", "t3", "v3");
        other.add_point("b", [2.0, 2.0, 2.0]);

        let rejected = base.merge(other);
        assert_eq!(rejected, vec![ReferenceId::new("a")]);
        assert_eq!(base.references.len(), 2);
        assert_eq!(
            base.references.get(&"a".into()),
            Some(&Reference::new("t1", "v1"))
        );
        assert_eq!(base.points.len(), 2);
        assert_eq!(base.point(1).unwrap().reference.as_str(), "b");
    }

    #[test]
    fn clear_empties_both_tables() {
        let mut map = PointCloudMap::new();
        map.add_reference("a", "t", "v");
        map.add_point("a", [1.0, 2.0, 3.0]);
        map.clear();
        assert!(map.references.is_empty());
        assert!(map.points.is_empty());
    }
}
