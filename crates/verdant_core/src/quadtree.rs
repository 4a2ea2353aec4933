use verdant_data::Rectangle;

/// A point in the index, tagged with the handle of whatever sits there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint<T> {
    pub x: f64,
    pub y: f64,
    pub owner: T,
}

impl<T> IndexedPoint<T> {
    pub fn new(x: f64, y: f64, owner: T) -> Self {
        Self { x, y, owner }
    }
}

pub const DEFAULT_MAX_DEPTH: usize = 24;

/// Point quadtree for rectangular range queries.
///
/// Rebuilt from scratch every tick and never updated incrementally.
///
/// # Invariants
/// - A leaf holds at most `capacity` points, except a leaf at `max_depth`,
///   which keeps accepting so that coincident points cannot subdivide forever.
/// - A node subdivides at most once. Its four children partition its
///   boundary with shared edges, in the fixed order NW, NE, SW, SE.
/// - A divided node stores no new points; insertion goes to the first child
///   whose boundary contains the point.
///
/// # Examples
/// ```
/// use verdant_core::quadtree::{IndexedPoint, QuadTree};
/// use verdant_data::Rectangle;
///
/// let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0), 4);
/// assert!(tree.insert(IndexedPoint::new(10.0, 10.0, 1usize)));
/// assert!(!tree.insert(IndexedPoint::new(150.0, 10.0, 2usize)));
///
/// let found = tree.query(&Rectangle::new(0.0, 0.0, 20.0, 20.0));
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].owner, 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    boundary: Rectangle,
    capacity: usize,
    depth: usize,
    max_depth: usize,
    points: Vec<IndexedPoint<T>>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Copy> QuadTree<T> {
    pub fn new(boundary: Rectangle, capacity: usize) -> Self {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(boundary: Rectangle, capacity: usize, max_depth: usize) -> Self {
        Self::node(boundary, capacity.max(1), 0, max_depth)
    }

    fn node(boundary: Rectangle, capacity: usize, depth: usize, max_depth: usize) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            max_depth,
            points: Vec::with_capacity(capacity),
            children: None,
        }
    }

    /// Builds a tree from an iterator of points, returning the tree and the
    /// number of points rejected for lying outside `boundary`.
    pub fn build<I>(boundary: Rectangle, capacity: usize, max_depth: usize, points: I) -> (Self, usize)
    where
        I: IntoIterator<Item = IndexedPoint<T>>,
    {
        let mut tree = Self::with_max_depth(boundary, capacity, max_depth);
        let mut rejected = 0;
        for point in points {
            if !tree.insert(point) {
                rejected += 1;
            }
        }
        (tree, rejected)
    }

    /// Inserts a point. Returns false when it lies outside this node.
    pub fn insert(&mut self, point: IndexedPoint<T>) -> bool {
        if !self.boundary.contains(point.x, point.y) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < self.capacity || self.depth >= self.max_depth {
                self.points.push(point);
                return true;
            }
            self.subdivide();
        }

        match self.children.as_deref_mut() {
            Some(children) => children.iter_mut().any(|child| child.insert(point)),
            None => false,
        }
    }

    fn subdivide(&mut self) {
        let Rectangle { x, y, w, h } = self.boundary;
        let mid_x = x + w / 2.0;
        let mid_y = y + h / 2.0;
        // Far halves are measured back from the parent's edges so the
        // children end exactly where the parent does.
        let west_w = mid_x - x;
        let east_w = (x + w) - mid_x;
        let north_h = mid_y - y;
        let south_h = (y + h) - mid_y;

        let child = |rect| Self::node(rect, self.capacity, self.depth + 1, self.max_depth);
        self.children = Some(Box::new([
            child(Rectangle::new(x, y, west_w, north_h)),
            child(Rectangle::new(mid_x, y, east_w, north_h)),
            child(Rectangle::new(x, mid_y, west_w, south_h)),
            child(Rectangle::new(mid_x, mid_y, east_w, south_h)),
        ]));
    }

    /// All points inside `range`, in no particular order.
    pub fn query(&self, range: &Rectangle) -> Vec<IndexedPoint<T>> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    /// Appends all points inside `range` to `result`.
    pub fn query_into(&self, range: &Rectangle, result: &mut Vec<IndexedPoint<T>>) {
        if !self.boundary.intersects(range) {
            return;
        }

        result.extend(
            self.points
                .iter()
                .filter(|p| range.contains(p.x, p.y))
                .copied(),
        );

        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query_into(range, result);
            }
        }
    }

    /// Number of points inside `range`.
    pub fn count(&self, range: &Rectangle) -> usize {
        if !self.boundary.intersects(range) {
            return 0;
        }
        let own = self
            .points
            .iter()
            .filter(|p| range.contains(p.x, p.y))
            .count();
        own + self
            .children
            .as_deref()
            .map_or(0, |children| children.iter().map(|c| c.count(range)).sum())
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth of this node, the root being 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Points stored directly in this node.
    pub fn points(&self) -> &[IndexedPoint<T>] {
        &self.points
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// NW, NE, SW, SE children, present once divided.
    pub fn children(&self) -> Option<&[QuadTree<T>; 4]> {
        self.children.as_deref()
    }

    /// Total points in this subtree.
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_deref()
                .map_or(0, |children| children.iter().map(QuadTree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every node of the subtree, parents before children.
    pub fn for_each_node<F>(&self, f: &mut F)
    where
        F: FnMut(&QuadTree<T>),
    {
        f(self);
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.for_each_node(f);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.for_each_node(&mut |_| count += 1);
        count
    }
}
