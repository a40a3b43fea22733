use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A single draw command produced by the interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    /// A branch segment between two world-space points.
    Segment { start: Vec3, end: Vec3 },
    /// A leaf marker placed at `point` with the turtle's orientation at that moment.
    Marker { point: Vec3, orientation: Quat },
}

impl DrawPrimitive {
    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Segment { .. })
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker { .. })
    }
}

/// The ordered output of one interpretation pass.
///
/// A `Drawing` is always complete: a pass that fails produces no `Drawing` at all.
/// Hosts replace the whole drawing on every regeneration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub primitives: Vec<DrawPrimitive>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, primitive: DrawPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawPrimitive> {
        self.primitives.iter()
    }

    /// Iterates `(start, end)` of every segment, in emission order.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            DrawPrimitive::Segment { start, end } => Some((start, end)),
            DrawPrimitive::Marker { .. } => None,
        })
    }

    /// Iterates `(point, orientation)` of every marker, in emission order.
    pub fn markers(&self) -> impl Iterator<Item = (Vec3, Quat)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            DrawPrimitive::Marker { point, orientation } => Some((point, orientation)),
            DrawPrimitive::Segment { .. } => None,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    /// Axis-aligned bounds `(min, max)` over every emitted point, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.primitives.iter().flat_map(|p| match *p {
            DrawPrimitive::Segment { start, end } => [Some(start), Some(end)],
            DrawPrimitive::Marker { point, .. } => [Some(point), None],
        });
        let first = points.next().flatten()?;
        Some(
            points
                .flatten()
                .fold((first, first), |(min, max), p| (min.min(p), max.max(p))),
        )
    }
}

impl IntoIterator for Drawing {
    type Item = DrawPrimitive;
    type IntoIter = std::vec::IntoIter<DrawPrimitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.into_iter()
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a DrawPrimitive;
    type IntoIter = std::slice::Iter<'a, DrawPrimitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}
