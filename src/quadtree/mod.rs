//! Point quadtree with per-node buckets.
//!
//! A node keeps up to `capacity` points itself. The first point that arrives at a full node
//! splits it into four quadrants, after which every new point is handed down to the children.
//! Points already stored in the bucket stay where they are.
mod config;

pub use config::{Config, DEFAULT_MAX_DEPTH};

use crate::{Point, Region, Result};
use arrayvec::ArrayVec;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Quadtree {
    boundary: Region,
    config: Config,
    depth: u32,

    points: Vec<Point>,
    children: Option<Box<Children>>,
}

/// The four quadrants of a subdivided node. North is the smaller `y`.
#[derive(Debug, Clone)]
pub struct Children {
    northeast: Quadtree,
    northwest: Quadtree,
    southeast: Quadtree,
    southwest: Quadtree,
}

impl Children {
    fn new(boundary: &Region, config: Config, depth: u32) -> Self {
        let [ne, nw, se, sw] = boundary.quadrants();
        Self {
            northeast: Quadtree::node(ne, config, depth),
            northwest: Quadtree::node(nw, config, depth),
            southeast: Quadtree::node(se, config, depth),
            southwest: Quadtree::node(sw, config, depth),
        }
    }

    pub fn northeast(&self) -> &Quadtree {
        &self.northeast
    }

    pub fn northwest(&self) -> &Quadtree {
        &self.northwest
    }

    pub fn southeast(&self) -> &Quadtree {
        &self.southeast
    }

    pub fn southwest(&self) -> &Quadtree {
        &self.southwest
    }

    /// Iterate in insertion order: northeast, northwest, southeast, southwest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Quadtree> {
        ArrayVec::from([
            &self.northeast,
            &self.northwest,
            &self.southeast,
            &self.southwest,
        ])
        .into_iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Quadtree> {
        ArrayVec::from([
            &mut self.northeast,
            &mut self.northwest,
            &mut self.southeast,
            &mut self.southwest,
        ])
        .into_iter()
    }

    /// Queries visit the western quadrants first.
    fn query_order(&self) -> [&Quadtree; 4] {
        [
            &self.northwest,
            &self.northeast,
            &self.southwest,
            &self.southeast,
        ]
    }
}

impl Quadtree {
    /// Panics if `capacity` is 0.
    pub fn new(boundary: Region, capacity: usize) -> Self {
        Self::with_config(boundary, Config::default().with_capacity(capacity))
    }

    /// Panics if `config.capacity` is 0.
    pub fn with_config(boundary: Region, config: Config) -> Self {
        assert!(config.capacity >= 1, "node capacity must be at least 1");
        debug!(
            ?boundary,
            capacity = config.capacity,
            max_depth = config.max_depth,
            "created quadtree"
        );
        Self::node(boundary, config, 0)
    }

    /// Checked version of `new`, rejects a zero capacity and non-finite or negative boundaries.
    pub fn try_new(boundary: Region, capacity: usize) -> Result<Self> {
        Self::try_with_config(boundary, Config::default().with_capacity(capacity))
    }

    pub fn try_with_config(boundary: Region, config: Config) -> Result<Self> {
        let boundary = Region::try_new(
            boundary.x(),
            boundary.y(),
            boundary.width(),
            boundary.height(),
        )?;
        config.validate()?;
        Ok(Self::with_config(boundary, config))
    }

    fn node(boundary: Region, config: Config, depth: u32) -> Self {
        Self {
            boundary,
            config,
            depth,
            points: Vec::with_capacity(config.capacity),
            children: None,
        }
    }

    /// Build a tree over the smallest region containing every point, then insert them all.
    pub fn from_points<It>(it: It, capacity: usize) -> Self
    where
        It: IntoIterator<Item = Point>,
    {
        let points = it.into_iter().collect::<Vec<_>>();
        let mut tree = Self::new(Region::bounding(&points), capacity);
        let inserted = tree.extend(points.iter().copied());
        debug_assert_eq!(inserted, points.len());
        tree
    }

    /// Insert every point, return how many were accepted.
    pub fn extend<It>(&mut self, it: It) -> usize
    where
        It: IntoIterator<Item = Point>,
    {
        let mut inserted = 0;
        for p in it {
            if self.insert(p) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Return if the insertion was successful.
    ///
    /// Points outside of this node's boundary are rejected without touching the tree.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.boundary.contains(&point) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < self.config.capacity {
                self.points.push(point);
                return true;
            }
            if self.depth >= self.config.max_depth {
                trace!(
                    depth = self.depth,
                    len = self.points.len(),
                    "max depth reached, overflowing bucket"
                );
                self.points.push(point);
                return true;
            }
        }

        // A point on a shared edge goes to the first quadrant that accepts it.
        self.subdivide()
            .iter_mut()
            .any(|child| child.insert(point))
    }

    /// Split into four children on the first call, return the children.
    fn subdivide(&mut self) -> &mut Children {
        let (boundary, config, depth) = (self.boundary, self.config, self.depth);

        self.children.get_or_insert_with(|| {
            trace!(depth, ?boundary, "subdividing node");
            Box::new(Children::new(&boundary, config, depth + 1))
        })
    }

    /// All points inside `range`, in traversal order: own bucket first, then the children
    /// northwest, northeast, southwest, southeast.
    pub fn query(&self, range: &Region) -> Vec<Point> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    /// Same as `query` but appends to `out`.
    pub fn query_into(&self, range: &Region, out: &mut Vec<Point>) {
        if !self.boundary.intersects(range) {
            return;
        }

        out.extend(self.points.iter().filter(|p| range.contains(p)));

        if let Some(ref children) = self.children {
            for child in children.query_order().iter() {
                child.query_into(range, out);
            }
        }
    }

    /// Same result as `query`, sibling subtrees are searched in parallel.
    pub fn par_query(&self, range: &Region) -> Vec<Point> {
        if !self.boundary.intersects(range) {
            return Vec::new();
        }

        let mut found = self
            .points
            .iter()
            .filter(|p| range.contains(p))
            .copied()
            .collect::<Vec<_>>();

        if let Some(ref children) = self.children {
            let hits = children
                .query_order()
                .iter()
                .copied()
                .filter(|child| child.boundary.intersects(range))
                .collect::<ArrayVec<[&Quadtree; 4]>>();
            found.extend(par_query_nodes(&hits, range));
        }
        found
    }

    /// Points within `radius` of `center`, in the same order `query` would return them.
    pub fn find_in_radius(&self, center: &Point, radius: f64, out: &mut Vec<Point>) {
        let aabb = Region::new(
            center.x - radius,
            center.y - radius,
            radius * 2.,
            radius * 2.,
        );
        self.find_in_radius_impl(center, radius, &aabb, out);
    }

    fn find_in_radius_impl(&self, center: &Point, radius: f64, aabb: &Region, out: &mut Vec<Point>) {
        if !self.boundary.intersects(aabb) {
            return;
        }

        out.extend(
            self.points
                .iter()
                .filter(|p| p.distance_to(center) <= radius),
        );

        if let Some(ref children) = self.children {
            for child in children.query_order().iter() {
                child.find_in_radius_impl(center, radius, aabb, out);
            }
        }
    }

    /// Return if a point with exactly these coordinates is stored.
    pub fn contains_point(&self, point: &Point) -> bool {
        if !self.boundary.contains(point) {
            return false;
        }

        if self.points.iter().any(|p| p == point) {
            return true;
        }

        match self.children {
            Some(ref children) => children.iter().any(|child| child.contains_point(point)),
            None => false,
        }
    }

    /// Mirror every boundary and point inside a frame of the given height, `y` becomes
    /// `height - y`.
    ///
    /// Quadrant names keep referring to the same subtrees, so after reflecting `northeast` lies
    /// to the south.
    pub fn reflect_y(&mut self, height: f64) {
        self.boundary = self.boundary.reflect_y(height);
        for p in self.points.iter_mut() {
            p.y = height - p.y;
        }
        if let Some(ref mut children) = self.children {
            for child in children.iter_mut() {
                child.reflect_y(height);
            }
        }
    }

    /// Pre-order walk of this subtree: the node itself, then northeast, northwest, southeast and
    /// southwest recursively.
    pub fn nodes(&self) -> Nodes {
        Nodes { stack: vec![self] }
    }

    /// Number of points stored in this subtree.
    pub fn len(&self) -> usize {
        self.nodes().map(|node| node.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().all(|node| node.points.is_empty())
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Number of levels in this subtree, 1 for a leaf.
    pub fn height(&self) -> u32 {
        self.nodes()
            .map(|node| node.depth - self.depth + 1)
            .max()
            .unwrap_or(1)
    }

    pub fn boundary(&self) -> &Region {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 0 for the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The points stored directly in this node, not including the children.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> Option<&Children> {
        self.children.as_deref()
    }
}

fn par_query_nodes(nodes: &[&Quadtree], range: &Region) -> Vec<Point> {
    match nodes {
        [] => Vec::new(),
        [node] => node.par_query(range),
        _ => {
            let (lo, hi) = nodes.split_at(nodes.len() / 2);
            let (mut found, rest) = rayon::join(
                || par_query_nodes(lo, range),
                || par_query_nodes(hi, range),
            );
            found.extend(rest);
            found
        }
    }
}

/// Iterator returned by [`Quadtree::nodes`].
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<&'a Quadtree>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Quadtree;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(ref children) = node.children {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}
