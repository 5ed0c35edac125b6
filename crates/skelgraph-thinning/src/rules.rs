//! The local rewrite rules of the graph based thinning.
//!
//! Except for [`delete_border_nodes`], every rule scans the whole node set
//! against the same graph state, collects its removals and additions, and
//! applies them as one batch at the end of the scan.
//!
//! The rules that come in four symmetric cases are written once, for one
//! orientation, and rotated by quarter turns.

use crate::graph::{Edge, Node, PixelGraph};
use crate::neighbourhood::{Compass, Corner, EdgeRing, RingSlot};

use crate::neighbourhood::Compass::{East, North, NorthEast, South, SouthEast, SouthWest, West};

/// What a rule changed in the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Number of edges removed.
    pub removed_edges: usize,
    /// Number of edges added.
    pub added_edges: usize,
    /// Number of nodes removed.
    pub removed_nodes: usize,
}

impl RuleOutcome {
    /// Whether the rule left the graph untouched.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// A ring viewed after `quarters` quarter turns.
struct Rotated<'a> {
    ring: &'a EdgeRing,
    quarters: usize,
}

impl Rotated<'_> {
    fn spoke(&self, dir: Compass) -> bool {
        self.ring.has(RingSlot::Spoke(dir).rotated(self.quarters))
    }

    fn rim(&self, dir: Compass) -> bool {
        self.ring.has(RingSlot::Rim(dir).rotated(self.quarters))
    }

    fn chord(&self, corner: Corner) -> bool {
        self.ring.has(RingSlot::Chord(corner).rotated(self.quarters))
    }

    fn edge(&self, slot: RingSlot) -> Edge {
        slot.rotated(self.quarters).edge(self.ring.centre())
    }

    fn between(&self, a: Compass, b: Compass) -> Edge {
        let centre = self.ring.centre();
        Edge::new(
            centre.adjacent(a.rotated(self.quarters)),
            centre.adjacent(b.rotated(self.quarters)),
        )
    }
}

fn rotations(ring: &EdgeRing) -> impl Iterator<Item = Rotated<'_>> {
    (0..4).map(move |quarters| Rotated { ring, quarters })
}

/// The connectivity number of the centre of `ring`.
///
/// Counts the spokes, subtracts the pairs of consecutive spokes, adds the
/// corners whose three spokes all exist and subtracts the corners whose two
/// orthogonal spokes are joined by their chord. A ring with every spoke and
/// every chord has connectivity 0.
///
/// A node of connectivity 1 can be removed without splitting its neighbours.
pub fn connectivity_number(ring: &EdgeRing) -> i32 {
    if ring.is_closed() {
        return 0;
    }

    let spoke = |dir: Compass| ring.has(RingSlot::Spoke(dir));
    let mut connectivity = 0;

    for dir in Compass::ALL {
        if spoke(dir) {
            connectivity += 1;
            if spoke(dir.next()) {
                connectivity -= 1;
            }
        }
    }

    for corner in Corner::ALL {
        let (a, b) = corner.flanks();
        if spoke(a) && spoke(b) {
            if spoke(corner.diagonal()) {
                connectivity += 1;
            }
            if ring.has(RingSlot::Chord(corner)) {
                connectivity -= 1;
            }
        }
    }

    connectivity
}

/// Nodes of connectivity number 1, the removable border points of the graph.
pub fn border_nodes(graph: &PixelGraph) -> Vec<Node> {
    graph
        .nodes()
        .iter()
        .filter(|node| connectivity_number(&graph.edge_ring(node)) == 1)
        .copied()
        .collect()
}

/// Remove the chord that cuts off a concave corner.
///
/// When the diagonal neighbour of a corner is missing but both orthogonal
/// neighbours framing it exist, the edge joining those two is dropped.
pub fn delete_diag_at_concaves(graph: &mut PixelGraph) -> RuleOutcome {
    let mut to_remove = Vec::new();

    for node in graph.nodes().iter() {
        let n = graph.neighbours(node);
        for corner in Corner::ALL {
            let (a, b) = corner.flanks();
            if n[corner.diagonal().code()].is_some() {
                continue;
            }
            if let (Some(a), Some(b)) = (n[a.code()], n[b.code()]) {
                to_remove.push(Edge::new(a, b));
            }
        }
    }

    to_remove.sort_unstable();
    to_remove.dedup();

    let outcome = RuleOutcome {
        removed_edges: graph.remove_edges(&to_remove),
        ..Default::default()
    };
    log::trace!("delete_diag_at_concaves: {outcome:?}");
    outcome
}

/// Peel the border nodes of connectivity number 1.
///
/// Nodes are visited in order and each decision sees the removals already
/// made in the same pass. With `preserve_end_points`, a node with fewer than
/// two edges is kept, so that lines do not erode from their ends.
pub fn delete_border_nodes(graph: &mut PixelGraph, preserve_end_points: bool) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let snapshot: Vec<Node> = graph.nodes().iter().copied().collect();

    for node in snapshot {
        let ring = graph.edge_ring(&node);
        if connectivity_number(&ring) != 1 {
            continue;
        }
        if preserve_end_points && ring.degree() < 2 {
            continue;
        }
        if let Some(removed) = graph.remove_node(&node) {
            outcome.removed_edges += removed;
            outcome.removed_nodes += 1;
        }
    }

    log::trace!("delete_border_nodes: {outcome:?}");
    outcome
}

/// Remove diagonal edges that duplicate a path of two orthogonal ones.
///
/// Looking south-west: when the south spoke and the rim from south-west to
/// south exist, the south-west spoke is redundant unless the west spoke and
/// the west rim close the symmetric path.
pub fn delete_extra_diag_edges(graph: &mut PixelGraph) -> RuleOutcome {
    let mut to_remove = Vec::new();

    for node in graph.nodes().iter() {
        let ring = graph.edge_ring(node);
        for r in rotations(&ring) {
            if r.spoke(SouthWest)
                && r.spoke(South)
                && r.rim(SouthWest)
                && !(r.spoke(West) && r.rim(West))
            {
                to_remove.push(r.edge(RingSlot::Spoke(SouthWest)));
            }
        }
    }

    to_remove.sort_unstable();
    to_remove.dedup();

    let outcome = RuleOutcome {
        removed_edges: graph.remove_edges(&to_remove),
        ..Default::default()
    };
    log::trace!("delete_extra_diag_edges: {outcome:?}");
    outcome
}

/// Remove orthogonal edges made redundant by a diagonal path.
///
/// Looking east: when the south-east spoke and the chord from south to east
/// exist, the east spoke is dropped if the north-east side offers no
/// alternative route.
pub fn delete_extra_vert_and_hor_edges(graph: &mut PixelGraph) -> RuleOutcome {
    let mut to_remove = Vec::new();

    for node in graph.nodes().iter() {
        let ring = graph.edge_ring(node);
        for r in rotations(&ring) {
            if !(r.spoke(East) && r.spoke(SouthEast) && r.chord(Corner::SouthEast)) {
                continue;
            }
            let open_north_east = (!r.spoke(NorthEast) && !r.chord(Corner::NorthEast))
                || (!r.spoke(NorthEast) && !r.spoke(North))
                || (!r.rim(East) && !r.chord(Corner::NorthEast));
            if open_north_east {
                to_remove.push(r.edge(RingSlot::Spoke(East)));
            }
        }
    }

    to_remove.sort_unstable();
    to_remove.dedup();

    let outcome = RuleOutcome {
        removed_edges: graph.remove_edges(&to_remove),
        ..Default::default()
    };
    log::trace!("delete_extra_vert_and_hor_edges: {outcome:?}");
    outcome
}

/// Replace crossing edges by non crossing ones.
///
/// At the south-west corner the diagonal spoke crosses the chord from west
/// to south. Depending on the surrounding edges one of the two is removed
/// and the rims that keep the three neighbours connected are added.
/// Removals are applied before additions.
pub fn delete_intersections(graph: &mut PixelGraph) -> RuleOutcome {
    let mut to_remove = Vec::new();
    let mut to_add = Vec::new();

    for node in graph.nodes().iter() {
        let ring = graph.edge_ring(node);
        for r in rotations(&ring) {
            if !(r.spoke(SouthWest) && r.chord(Corner::SouthWest)) {
                continue;
            }

            let chord = r.edge(RingSlot::Chord(Corner::SouthWest));
            let diagonal = r.edge(RingSlot::Spoke(SouthWest));
            let west_rim = r.between(West, SouthWest);
            let south_rim = r.between(SouthWest, South);

            match (
                r.spoke(West),
                r.spoke(South),
                r.rim(West),
                r.rim(SouthWest),
            ) {
                // S1
                (false, false, false, false) => {
                    to_remove.push(chord);
                    to_add.extend([west_rim, south_rim]);
                }
                // S2
                (false, true, false, false) => {
                    to_remove.push(diagonal);
                    to_add.push(south_rim);
                }
                // S3
                (false, false, true, false) => {
                    to_remove.push(chord);
                    to_add.push(south_rim);
                }
                // S4
                (false, false, false, true) => {
                    to_remove.push(chord);
                    to_add.push(west_rim);
                }
                // S5
                (true, false, false, false) => {
                    to_remove.push(diagonal);
                    to_add.push(west_rim);
                }
                _ => {}
            }
        }
    }

    to_remove.sort_unstable();
    to_remove.dedup();
    to_add.sort_unstable();
    to_add.dedup();

    let removed_edges = graph.remove_edges(&to_remove);
    let added_edges = graph.add_edges(&to_add);

    let outcome = RuleOutcome {
        removed_edges,
        added_edges,
        removed_nodes: 0,
    };
    log::trace!("delete_intersections: {outcome:?}");
    outcome
}
