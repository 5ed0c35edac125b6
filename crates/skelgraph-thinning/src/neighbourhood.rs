use crate::graph::{Edge, Node, PixelGraph};

/// One of the 8 positions around a pixel.
///
/// Codes run counter-clockwise starting at west, so adding 2 to a code turns
/// it by a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Compass {
    /// `(0, -1)`
    West,
    /// `(+1, -1)`
    SouthWest,
    /// `(+1, 0)`
    South,
    /// `(+1, +1)`
    SouthEast,
    /// `(0, +1)`
    East,
    /// `(-1, +1)`
    NorthEast,
    /// `(-1, 0)`
    North,
    /// `(-1, -1)`
    NorthWest,
}

impl Compass {
    /// All directions, in code order.
    pub const ALL: [Compass; 8] = [
        Compass::West,
        Compass::SouthWest,
        Compass::South,
        Compass::SouthEast,
        Compass::East,
        Compass::NorthEast,
        Compass::North,
        Compass::NorthWest,
    ];

    /// The numeric code of the direction, in `0..8`.
    pub const fn code(self) -> usize {
        self as usize
    }

    /// The direction with the given code, if it is in `0..8`.
    pub fn from_code(code: usize) -> Option<Compass> {
        Self::ALL.get(code).copied()
    }

    /// `(row, col)` offset of the direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Compass::West => (0, -1),
            Compass::SouthWest => (1, -1),
            Compass::South => (1, 0),
            Compass::SouthEast => (1, 1),
            Compass::East => (0, 1),
            Compass::NorthEast => (-1, 1),
            Compass::North => (-1, 0),
            Compass::NorthWest => (-1, -1),
        }
    }

    /// The direction turned counter-clockwise by `quarters` quarter turns.
    pub fn rotated(self, quarters: usize) -> Compass {
        Self::ALL[(self.code() + 2 * quarters) % 8]
    }

    /// The next direction counter-clockwise.
    pub fn next(self) -> Compass {
        Self::ALL[(self.code() + 1) % 8]
    }

    /// Whether the direction is diagonal.
    pub const fn is_diagonal(self) -> bool {
        self.code() % 2 == 1
    }
}

/// One of the 4 diagonal corners around a pixel.
///
/// Corner `q` sits between the orthogonal directions `2q` and `2q + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Corner {
    /// Between west and south.
    SouthWest,
    /// Between south and east.
    SouthEast,
    /// Between east and north.
    NorthEast,
    /// Between north and west.
    NorthWest,
}

impl Corner {
    /// All corners, in index order.
    pub const ALL: [Corner; 4] = [
        Corner::SouthWest,
        Corner::SouthEast,
        Corner::NorthEast,
        Corner::NorthWest,
    ];

    /// The index of the corner, in `0..4`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The corner turned counter-clockwise by `quarters` quarter turns.
    pub fn rotated(self, quarters: usize) -> Corner {
        Self::ALL[(self.index() + quarters) % 4]
    }

    /// The two orthogonal directions framing the corner, clockwise first.
    pub fn flanks(self) -> (Compass, Compass) {
        let first = Compass::ALL[2 * self.index()];
        (first, first.rotated(1))
    }

    /// The diagonal direction pointing into the corner.
    pub fn diagonal(self) -> Compass {
        Compass::ALL[2 * self.index() + 1]
    }
}

impl Node {
    /// The position one step away in direction `dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skelgraph_thinning::graph::Node;
    /// use skelgraph_thinning::neighbourhood::Compass;
    ///
    /// assert_eq!(Node::new(3, 3).adjacent(Compass::NorthEast), Node::new(2, 4));
    /// ```
    pub fn adjacent(&self, dir: Compass) -> Node {
        let (dr, dc) = dir.offset();
        Node::new(self.row + dr, self.col + dc)
    }

    /// The direction from this node to `other`, if they are adjacent.
    pub fn adjacent_code(&self, other: &Node) -> Option<Compass> {
        let delta = (other.row - self.row, other.col - self.col);
        Compass::ALL.into_iter().find(|dir| dir.offset() == delta)
    }

    /// Numeric form of [`Node::adjacent_code`]: the code in `0..8`, or `-1`.
    pub fn adjacent_code_raw(&self, other: &Node) -> i32 {
        self.adjacent_code(other)
            .map_or(-1, |dir| dir.code() as i32)
    }

    /// The 8 positions around the node, in code order.
    pub fn neighbour_positions(&self) -> [Node; 8] {
        Compass::ALL.map(|dir| self.adjacent(dir))
    }
}

/// A named edge position inside the 3x3 block around a node.
///
/// Writing `d_k` for the neighbour in direction `k`:
/// * `Spoke(k)` is the edge from the centre to `d_k`,
/// * `Rim(k)` is the edge `d_k - d_{k+1}`,
/// * `Chord(q)` is the edge `d_{2q} - d_{2q+2}` across corner `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingSlot {
    /// Edge between the centre and a neighbour.
    Spoke(Compass),
    /// Edge between two consecutive neighbours.
    Rim(Compass),
    /// Edge between the two orthogonal neighbours of a corner.
    Chord(Corner),
}

impl RingSlot {
    /// Every slot, in the order of [`RingSlot::legacy_index`].
    pub fn all() -> impl Iterator<Item = RingSlot> {
        let spokes = Compass::ALL.into_iter().map(RingSlot::Spoke);
        let rims = Compass::ALL.into_iter().map(RingSlot::Rim);
        let chords = Corner::ALL.into_iter().map(RingSlot::Chord);
        spokes.chain(rims).chain(chords)
    }

    /// Index of the slot in the 20-slot circle; the first 16 slots form the 16-slot circle.
    pub fn legacy_index(self) -> usize {
        match self {
            RingSlot::Spoke(dir) => dir.code(),
            RingSlot::Rim(dir) => 8 + dir.code(),
            RingSlot::Chord(corner) => 16 + corner.index(),
        }
    }

    /// Index of the slot in the 13-slot closed circle; rims are not part of it.
    pub fn closed_circle_index(self) -> Option<usize> {
        match self {
            RingSlot::Spoke(dir) => Some(dir.code()),
            RingSlot::Rim(_) => None,
            RingSlot::Chord(corner) => Some(9 + corner.index()),
        }
    }

    /// The slot turned counter-clockwise by `quarters` quarter turns.
    pub fn rotated(self, quarters: usize) -> RingSlot {
        match self {
            RingSlot::Spoke(dir) => RingSlot::Spoke(dir.rotated(quarters)),
            RingSlot::Rim(dir) => RingSlot::Rim(dir.rotated(quarters)),
            RingSlot::Chord(corner) => RingSlot::Chord(corner.rotated(quarters)),
        }
    }

    /// The edge occupying this slot around `centre`.
    pub fn edge(self, centre: Node) -> Edge {
        match self {
            RingSlot::Spoke(dir) => Edge::new(centre, centre.adjacent(dir)),
            RingSlot::Rim(dir) => Edge::new(centre.adjacent(dir), centre.adjacent(dir.next())),
            RingSlot::Chord(corner) => {
                let (a, b) = corner.flanks();
                Edge::new(centre.adjacent(a), centre.adjacent(b))
            }
        }
    }

    /// The slot an edge between the positions `a` and `b` of the block occupies.
    ///
    /// `None` stands for the centre. Pairs that are not 8-adjacent have no slot.
    fn classify(a: Option<Compass>, b: Option<Compass>) -> Option<RingSlot> {
        match (a, b) {
            (None, Some(dir)) | (Some(dir), None) => Some(RingSlot::Spoke(dir)),
            (Some(p), Some(q)) => {
                if p.next() == q {
                    Some(RingSlot::Rim(p))
                } else if q.next() == p {
                    Some(RingSlot::Rim(q))
                } else if !p.is_diagonal() && p.rotated(1) == q {
                    Some(RingSlot::Chord(Corner::ALL[p.code() / 2]))
                } else if !q.is_diagonal() && q.rotated(1) == p {
                    Some(RingSlot::Chord(Corner::ALL[q.code() / 2]))
                } else {
                    None
                }
            }
            (None, None) => None,
        }
    }
}

/// Which of the 20 edges of the 3x3 block around a node exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRing {
    centre: Node,
    spokes: [bool; 8],
    rims: [bool; 8],
    chords: [bool; 4],
}

impl EdgeRing {
    fn empty(centre: Node) -> Self {
        Self {
            centre,
            spokes: [false; 8],
            rims: [false; 8],
            chords: [false; 4],
        }
    }

    fn set(&mut self, slot: RingSlot) {
        match slot {
            RingSlot::Spoke(dir) => self.spokes[dir.code()] = true,
            RingSlot::Rim(dir) => self.rims[dir.code()] = true,
            RingSlot::Chord(corner) => self.chords[corner.index()] = true,
        }
    }

    /// The node the ring is centred on.
    pub fn centre(&self) -> Node {
        self.centre
    }

    /// Whether the edge in `slot` exists.
    pub fn has(&self, slot: RingSlot) -> bool {
        match slot {
            RingSlot::Spoke(dir) => self.spokes[dir.code()],
            RingSlot::Rim(dir) => self.rims[dir.code()],
            RingSlot::Chord(corner) => self.chords[corner.index()],
        }
    }

    /// The edge in `slot`, if it exists.
    pub fn get(&self, slot: RingSlot) -> Option<Edge> {
        self.has(slot).then(|| slot.edge(self.centre))
    }

    /// Number of edges incident to the centre.
    pub fn degree(&self) -> usize {
        self.spokes.iter().filter(|&&s| s).count()
    }

    /// Whether every spoke and every chord exists.
    pub fn is_closed(&self) -> bool {
        self.spokes.iter().all(|&s| s) && self.chords.iter().all(|&c| c)
    }
}

impl PixelGraph {
    /// The nodes around `node` that are still in the graph, indexed by compass code.
    pub fn neighbours(&self, node: &Node) -> [Option<Node>; 8] {
        let mut result = [None; 8];
        let lo = Node::new(node.row - 1, node.col - 1);
        let hi = Node::new(node.row + 1, node.col + 2);
        for other in self.nodes.range(&lo, &hi) {
            if let Some(dir) = node.adjacent_code(other) {
                result[dir.code()] = Some(*other);
            }
        }
        result
    }

    /// Classify every edge lying inside the 3x3 block around `node`.
    ///
    /// `node` itself does not need to be in the graph.
    pub fn edge_ring(&self, node: &Node) -> EdgeRing {
        let mut ring = EdgeRing::empty(*node);
        let position = |n: &Node| -> Option<Option<Compass>> {
            if n == node {
                Some(None)
            } else {
                node.adjacent_code(n).map(Some)
            }
        };

        // an edge inside the block starts on one of its three rows
        for row in node.row - 1..=node.row + 1 {
            let lo = Edge::lower_bound(Node::new(row, node.col - 1));
            let hi = Edge::lower_bound(Node::new(row, node.col + 2));
            for edge in self.edges.range(&lo, &hi) {
                let (Some(a), Some(b)) = (position(&edge.src()), position(&edge.dst())) else {
                    continue;
                };
                if let Some(slot) = RingSlot::classify(a, b) {
                    ring.set(slot);
                }
            }
        }

        ring
    }

    /// The 13-slot closed circle around `node`.
    ///
    /// Slots 0 to 7 hold the spokes, slot 8 repeats slot 0 and slots 9 to 12
    /// hold the chords.
    pub fn closed_circle_edges(&self, node: &Node) -> [Option<Edge>; 13] {
        let ring = self.edge_ring(node);
        let mut result = [None; 13];
        for slot in RingSlot::all() {
            if let Some(i) = slot.closed_circle_index() {
                result[i] = ring.get(slot);
            }
        }
        result[8] = result[0];
        result
    }

    /// The 16-slot circle around `node`: spokes then rims.
    pub fn circle16_edges(&self, node: &Node) -> [Option<Edge>; 16] {
        let ring = self.edge_ring(node);
        let mut result = [None; 16];
        for slot in RingSlot::all().filter(|s| s.legacy_index() < 16) {
            result[slot.legacy_index()] = ring.get(slot);
        }
        result
    }

    /// The 20-slot circle around `node`: spokes, rims, then chords.
    pub fn circle20_edges(&self, node: &Node) -> [Option<Edge>; 20] {
        let ring = self.edge_ring(node);
        let mut result = [None; 20];
        for slot in RingSlot::all() {
            result[slot.legacy_index()] = ring.get(slot);
        }
        result
    }
}
