//! Partial maps between vertex sets of two graphs

use crate::graph::{Graph, Vertex};
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;
use std::fmt;

/// Image of a vertex under a [`PartialMap`]
///
/// A `Pair` identifies a point on the interface between two target
/// vertices; layouts place it at their midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Image {
    /// A single target vertex
    Single(Vertex),
    /// An ordered pair of target vertices
    Pair(Vertex, Vertex),
}

impl Image {
    /// Single vertex given by index
    pub fn single(i: usize) -> Image {
        Image::Single(NodeIndex::new(i))
    }

    /// Vertex pair given by indices
    pub fn pair(i: usize, j: usize) -> Image {
        Image::Pair(NodeIndex::new(i), NodeIndex::new(j))
    }

    /// The single vertex, if this is not a pair
    pub fn as_single(&self) -> Option<Vertex> {
        match *self {
            Image::Single(v) => Some(v),
            Image::Pair(..) => None,
        }
    }

    /// All target vertices in order
    pub fn vertices(&self) -> Vec<Vertex> {
        match *self {
            Image::Single(v) => vec![v],
            Image::Pair(a, b) => vec![a, b],
        }
    }

    /// Compose component-wise with a fallible vertex map
    pub fn try_map<E, F>(&self, mut f: F) -> Result<Image, E>
    where
        F: FnMut(Vertex) -> Result<Vertex, E>,
    {
        Ok(match *self {
            Image::Single(v) => Image::Single(f(v)?),
            Image::Pair(a, b) => Image::Pair(f(a)?, f(b)?),
        })
    }

    /// Compare identities, ignoring the order inside a pair
    pub fn same_identity(&self, other: &Image) -> bool {
        match (*self, *other) {
            (Image::Single(a), Image::Single(b)) => a == b,
            (Image::Pair(a, b), Image::Pair(c, d)) => (a == c && b == d) || (a == d && b == c),
            _ => false,
        }
    }
}

impl From<Vertex> for Image {
    fn from(v: Vertex) -> Self {
        Image::Single(v)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Image::Single(v) => write!(f, "{}", v.index()),
            Image::Pair(a, b) => write!(f, "{}:{}", a.index(), b.index()),
        }
    }
}

/// A finite partial map from vertices of a source graph to vertices or
/// vertex pairs of a target graph
///
/// The map does not own either graph; keys and values are handles that
/// the owner of the map keeps consistent with its graphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialMap {
    binding: BTreeMap<Vertex, Image>,
}

impl PartialMap {
    /// Create an empty map
    pub fn new() -> Self {
        PartialMap {
            binding: BTreeMap::new(),
        }
    }

    /// Build from `(source vertex index, image)` entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, Image)>,
    {
        entries
            .into_iter()
            .map(|(key, image)| (NodeIndex::new(key), image))
            .collect()
    }

    /// Bind `key`, returning the previous image
    pub fn insert(&mut self, key: Vertex, image: impl Into<Image>) -> Option<Image> {
        self.binding.insert(key, image.into())
    }

    /// Image of `key`
    pub fn get(&self, key: Vertex) -> Option<&Image> {
        self.binding.get(&key)
    }

    /// Image of `key` when it is a single vertex
    pub fn single(&self, key: Vertex) -> Option<Vertex> {
        self.get(key).and_then(Image::as_single)
    }

    /// Membership test
    pub fn contains(&self, key: Vertex) -> bool {
        self.binding.contains_key(&key)
    }

    /// All keys mapped to exactly the single vertex `target`
    pub fn inverse(&self, target: Vertex) -> Vec<Vertex> {
        self.binding
            .iter()
            .filter(|(_, image)| **image == Image::Single(target))
            .map(|(&key, _)| key)
            .collect()
    }

    /// Iterate over bindings in key order
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, &Image)> + '_ {
        self.binding.iter().map(|(&k, v)| (k, v))
    }

    /// Number of bound keys
    pub fn len(&self) -> usize {
        self.binding.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.binding.is_empty()
    }

    /// Vertices of `source` that have no image
    pub fn missing(&self, source: &Graph) -> Vec<Vertex> {
        source.vertices().filter(|&v| !self.contains(v)).collect()
    }

    /// True when every vertex of `source` has an image
    pub fn is_total_over(&self, source: &Graph) -> bool {
        source.vertices().all(|v| self.contains(v))
    }

    /// First image vertex that `target` does not contain
    pub fn out_of_range(&self, target: &Graph) -> Option<(Vertex, Vertex)> {
        self.iter().find_map(|(key, image)| {
            image
                .vertices()
                .into_iter()
                .find(|&v| !target.contains(v))
                .map(|v| (key, v))
        })
    }

    /// Compose with a map whose values on our images are single vertices
    ///
    /// Keys whose image (or a component of it) is unbound in `next` are dropped.
    pub fn compose_single(&self, next: &PartialMap) -> PartialMap {
        let binding = self
            .binding
            .iter()
            .filter_map(|(&key, image)| {
                image
                    .try_map(|v| next.single(v).ok_or(()))
                    .ok()
                    .map(|composed| (key, composed))
            })
            .collect();
        PartialMap { binding }
    }
}

impl FromIterator<(Vertex, Image)> for PartialMap {
    fn from_iter<I: IntoIterator<Item = (Vertex, Image)>>(iter: I) -> Self {
        PartialMap {
            binding: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PartialMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, image)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", key.index(), image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> Vertex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_inverse_ignores_pairs() {
        let mut map = PartialMap::new();
        map.insert(v(0), v(0));
        map.insert(v(1), Image::Pair(v(0), v(1)));
        map.insert(v(2), v(0));
        map.insert(v(3), v(1));

        assert_eq!(map.inverse(v(0)), vec![v(0), v(2)]);
        assert_eq!(map.inverse(v(1)), vec![v(3)]);
        assert!(map.inverse(v(5)).is_empty());
    }

    #[test]
    fn test_missing_and_range() {
        let source = Graph::from_edges(3, &[]);
        let target = Graph::from_edges(2, &[]);

        let mut map = PartialMap::new();
        map.insert(v(0), v(1));
        map.insert(v(2), Image::Pair(v(0), v(1)));
        assert_eq!(map.missing(&source), vec![v(1)]);
        assert!(!map.is_total_over(&source));
        assert_eq!(map.out_of_range(&target), None);

        map.insert(v(1), v(2));
        assert!(map.is_total_over(&source));
        assert_eq!(map.out_of_range(&target), Some((v(1), v(2))));
    }

    #[test]
    fn test_compose_single() {
        let mut first = PartialMap::new();
        first.insert(v(0), v(0));
        first.insert(v(1), Image::Pair(v(0), v(1)));
        first.insert(v(2), v(7));

        let mut second = PartialMap::new();
        second.insert(v(0), v(10));
        second.insert(v(1), v(11));

        let composed = first.compose_single(&second);
        assert_eq!(composed.get(v(0)), Some(&Image::Single(v(10))));
        assert_eq!(composed.get(v(1)), Some(&Image::Pair(v(10), v(11))));
        assert!(!composed.contains(v(2)));
    }

    #[test]
    fn test_same_identity() {
        let p = Image::Pair(v(0), v(1));
        assert!(p.same_identity(&Image::Pair(v(1), v(0))));
        assert!(!p.same_identity(&Image::Single(v(0))));
        assert_eq!(format!("{}", p), "0:1");
        assert_eq!(Image::pair(0, 1), p);
    }

    #[test]
    fn test_from_entries() {
        let map = PartialMap::from_entries([(0, Image::single(3)), (2, Image::pair(1, 2))]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.single(v(0)), Some(v(3)));
        assert_eq!(map.single(v(2)), None);
        assert_eq!(format!("{}", map), "0 -> 3, 2 -> 1:2");
    }
}
