use num_traits::Zero;
use skelgraph_image::{Image, ImageError};

use crate::sorted_set::SortedSet;

/// A foreground pixel of the working graph.
///
/// Nodes are ordered lexicographically by `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    /// Row of the pixel.
    pub row: isize,
    /// Column of the pixel.
    pub col: isize,
}

impl Node {
    /// Create a node at `(row, col)`.
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Whether `other` is one of the 8 pixels around this one.
    pub fn is_adjacent(&self, other: &Node) -> bool {
        let (dr, dc) = (other.row - self.row, other.col - self.col);
        dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// An adjacency between two 8-connected foreground pixels.
///
/// Each unordered pair is stored once, oriented from the smaller node to the
/// larger one. This gives left to right for horizontal edges, top to bottom
/// for vertical ones, `(i, j) -> (i+1, j+1)` on the main diagonal and
/// `(i, j) -> (i+1, j-1)` on the anti-diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    src: Node,
    dst: Node,
}

impl Edge {
    /// Create the edge joining `a` and `b`, in either order.
    pub fn new(a: Node, b: Node) -> Self {
        debug_assert!(a.is_adjacent(&b), "edge between non adjacent nodes {a} {b}");
        if a <= b {
            Self { src: a, dst: b }
        } else {
            Self { src: b, dst: a }
        }
    }

    /// The smaller endpoint.
    pub fn src(&self) -> Node {
        self.src
    }

    /// The larger endpoint.
    pub fn dst(&self) -> Node {
        self.dst
    }

    /// The smallest edge whose source is `node`, used as a range bound.
    pub(crate) const fn lower_bound(node: Node) -> Self {
        Self {
            src: node,
            dst: node,
        }
    }

    /// Whether the two endpoints differ in both row and column.
    pub fn is_diagonal(&self) -> bool {
        self.src.row != self.dst.row && self.src.col != self.dst.col
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.src, self.dst)
    }
}

/// The node and edge sets of a binary image.
///
/// Invariant: every edge joins two nodes of the node set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelGraph {
    pub(crate) nodes: SortedSet<Node>,
    pub(crate) edges: SortedSet<Edge>,
}

impl PixelGraph {
    /// Build the graph of the non-zero pixels of `img`.
    ///
    /// Every pair of 8-adjacent foreground pixels yields exactly one edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use skelgraph_image::{Image, ImageSize};
    /// use skelgraph_thinning::graph::PixelGraph;
    ///
    /// let img = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![1, 1, 1, 1]).unwrap();
    /// let graph = PixelGraph::from_image(&img);
    ///
    /// assert_eq!(graph.node_count(), 4);
    /// assert_eq!(graph.edge_count(), 6);
    /// ```
    pub fn from_image<T>(img: &Image<T, 1>) -> Self
    where
        T: Zero,
    {
        let (rows, cols) = (img.rows(), img.cols());
        let data = img.as_slice();
        let is_fg = |r: usize, c: usize| !data[r * cols + c].is_zero();

        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for r in 0..rows {
            for c in 0..cols {
                if !is_fg(r, c) {
                    continue;
                }
                let node = Node::new(r as isize, c as isize);
                nodes.push(node);

                // forward neighbours, in increasing order of the destination
                if c + 1 < cols && is_fg(r, c + 1) {
                    edges.push(Edge::new(node, Node::new(r as isize, c as isize + 1)));
                }
                if r + 1 < rows {
                    if c > 0 && is_fg(r + 1, c - 1) {
                        edges.push(Edge::new(node, Node::new(r as isize + 1, c as isize - 1)));
                    }
                    if is_fg(r + 1, c) {
                        edges.push(Edge::new(node, Node::new(r as isize + 1, c as isize)));
                    }
                    if c + 1 < cols && is_fg(r + 1, c + 1) {
                        edges.push(Edge::new(node, Node::new(r as isize + 1, c as isize + 1)));
                    }
                }
            }
        }

        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }

    /// Build a graph from explicit parts.
    ///
    /// Edges with an endpoint outside `nodes` are dropped.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let nodes = SortedSet::from_unsorted(nodes);
        let edges = edges
            .into_iter()
            .filter(|e| nodes.contains(&e.src()) && nodes.contains(&e.dst()))
            .collect();
        Self { nodes, edges }
    }

    /// The node set.
    pub fn nodes(&self) -> &SortedSet<Node> {
        &self.nodes
    }

    /// The edge set.
    pub fn edges(&self) -> &SortedSet<Edge> {
        &self.edges
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of nodes plus number of edges.
    pub fn graph_size(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Whether the graph has no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` is in the graph.
    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    /// Whether `edge` is in the graph.
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Remove a node together with every edge touching it.
    ///
    /// Returns the number of edges removed, or `None` if the node was absent.
    pub fn remove_node(&mut self, node: &Node) -> Option<usize> {
        if !self.nodes.remove(node) {
            return None;
        }
        let incident: Vec<Edge> = node
            .neighbour_positions()
            .into_iter()
            .map(|other| Edge::new(*node, other))
            .collect();
        Some(self.edges.remove_batch(&incident))
    }

    /// Remove a batch of edges, returning how many were present.
    pub fn remove_edges(&mut self, batch: &[Edge]) -> usize {
        self.edges.remove_batch(batch)
    }

    /// Add a batch of edges, returning how many were new.
    ///
    /// Edges whose endpoints are not both in the graph are ignored.
    pub fn add_edges(&mut self, batch: &[Edge]) -> usize {
        let nodes = &self.nodes;
        self.edges.insert_batch(
            batch
                .iter()
                .filter(|e| nodes.contains(&e.src()) && nodes.contains(&e.dst()))
                .copied(),
        )
    }

    /// Whether every edge joins two nodes of the graph.
    pub fn is_consistent(&self) -> bool {
        self.edges
            .iter()
            .all(|e| self.nodes.contains(&e.src()) && self.nodes.contains(&e.dst()))
    }

    /// Write the pixels of `src` that are nodes of the graph into `dst`.
    ///
    /// Every other pixel of `dst` is set to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` and `dst` differ in size.
    pub fn project<T>(&self, src: &Image<T, 1>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
    where
        T: Copy + Zero,
    {
        if src.size() != dst.size() {
            return Err(ImageError::InvalidImageSize(
                src.cols(),
                src.rows(),
                dst.cols(),
                dst.rows(),
            ));
        }

        dst.as_slice_mut().iter_mut().for_each(|x| *x = T::zero());

        for node in self.nodes.iter() {
            let (x, y) = (node.col as usize, node.row as usize);
            dst.set_pixel(x, y, 0, src.get_pixel(x, y, 0)?)?;
        }

        Ok(())
    }
}
