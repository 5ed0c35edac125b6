#![deny(missing_docs)]
//! Skeletonization of binary images.
//!
//! The main algorithm turns the foreground pixels into a graph whose edges
//! join 8-adjacent pixels, then rewrites the graph with local rules until it
//! reaches a fixed point. The classical raster algorithm of Zhang and Suen is
//! provided as well.

/// Error types for the thinning module.
pub mod error;

/// The pixel graph of a binary image.
pub mod graph;

/// Neighbourhood queries around a node of the graph.
pub mod neighbourhood;

/// The rewrite rules applied by the graph based thinning.
pub mod rules;

/// Ordered set with range queries backing the graph.
pub mod sorted_set;

/// The fixed-point driver of the graph based thinning.
pub mod thinning;

/// Zhang-Suen raster thinning.
pub mod zhang_suen;

pub use crate::error::ThinningError;
pub use crate::graph::{Edge, Node, PixelGraph};
pub use crate::thinning::{
    graph_based_thinning, graph_based_thinning_with_stats, thin_graph, ThinningConfig,
    ThinningStats,
};
pub use crate::zhang_suen::zhang_suen_thinning;
