use num_traits::Zero;
use skelgraph_image::{Image, ImageError};

use crate::error::ThinningError;
use crate::graph::PixelGraph;
use crate::rules;

/// Configuration of the graph based thinning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinningConfig {
    /// Never peel a node with fewer than two edges, so that the ends of a
    /// line survive.
    pub preserve_end_points: bool,
    /// Stop after this many outer iterations even if the graph still changes.
    pub max_iterations: Option<usize>,
}

impl Default for ThinningConfig {
    fn default() -> Self {
        Self {
            preserve_end_points: true,
            max_iterations: None,
        }
    }
}

/// Summary of one thinning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThinningStats {
    /// Number of outer iterations, including the one that found the fixed point.
    pub iterations: usize,
    /// Nodes of the graph built from the input.
    pub initial_nodes: usize,
    /// Edges of the graph built from the input.
    pub initial_edges: usize,
    /// Nodes left at the end.
    pub final_nodes: usize,
    /// Edges left at the end.
    pub final_edges: usize,
}

/// Apply the rewrite rules to `graph` until it stops changing.
///
/// One outer iteration removes the concave chords, peels the border nodes,
/// then alternates the redundant edge removals with the intersection
/// legalization until no crossing is left. The loop ends when an iteration
/// leaves the number of nodes plus edges unchanged, or after
/// `config.max_iterations` iterations.
///
/// Returns the number of outer iterations run.
pub fn thin_graph(graph: &mut PixelGraph, config: &ThinningConfig) -> usize {
    let mut graph_size = graph.graph_size();
    let mut iterations = 0;

    loop {
        if let Some(max_iterations) = config.max_iterations {
            if iterations >= max_iterations {
                log::warn!(
                    "thinning stopped after {iterations} iterations, graph size {}",
                    graph.graph_size()
                );
                break;
            }
        }
        iterations += 1;

        rules::delete_diag_at_concaves(graph);
        rules::delete_border_nodes(graph, config.preserve_end_points);

        loop {
            loop {
                let edge_count = graph.edge_count();
                rules::delete_extra_diag_edges(graph);
                rules::delete_extra_vert_and_hor_edges(graph);
                if graph.edge_count() == edge_count {
                    break;
                }
            }
            if rules::delete_intersections(graph).removed_edges == 0 {
                break;
            }
        }

        let new_size = graph.graph_size();
        log::debug!(
            "iteration {iterations}: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        if new_size == graph_size {
            break;
        }
        graph_size = new_size;
    }

    iterations
}

/// Thin a binary image through its pixel graph.
///
/// Non-zero pixels are foreground. The surviving pixels keep their value in
/// `dst` and every other pixel is set to zero; no pixel that is background in
/// `src` becomes foreground.
///
/// Border nodes are peeled one at a time in `(row, col)` order, which biases
/// the skeleton toward the bottom and right of thick strokes: a solid block
/// thins to its bottom row rather than to its centre.
///
/// # Arguments
///
/// * `src` - The binary input image.
/// * `dst` - The output image, of the same size as `src`.
/// * `config` - The thinning options.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
///
/// # Examples
///
/// ```
/// use skelgraph_image::{Image, ImageSize};
/// use skelgraph_thinning::{graph_based_thinning, ThinningConfig};
///
/// let src = Image::<u8, 1>::new(
///     ImageSize { width: 4, height: 3 },
///     vec![0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0],
/// )
/// .unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// graph_based_thinning(&src, &mut dst, &ThinningConfig::default()).unwrap();
/// assert_eq!(dst, src);
/// ```
pub fn graph_based_thinning<T>(
    src: &Image<T, 1>,
    dst: &mut Image<T, 1>,
    config: &ThinningConfig,
) -> Result<(), ThinningError>
where
    T: Copy + Zero,
{
    graph_based_thinning_with_stats(src, dst, config)?;
    Ok(())
}

/// Same as [`graph_based_thinning`], also reporting how the graph evolved.
pub fn graph_based_thinning_with_stats<T>(
    src: &Image<T, 1>,
    dst: &mut Image<T, 1>,
    config: &ThinningConfig,
) -> Result<ThinningStats, ThinningError>
where
    T: Copy + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let mut graph = PixelGraph::from_image(src);
    let mut stats = ThinningStats {
        initial_nodes: graph.node_count(),
        initial_edges: graph.edge_count(),
        ..Default::default()
    };

    if !graph.is_empty() {
        stats.iterations = thin_graph(&mut graph, config);
    }

    stats.final_nodes = graph.node_count();
    stats.final_edges = graph.edge_count();
    log::debug!("graph_based_thinning: {stats:?}");

    graph.project(src, dst)?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skelgraph_image::ImageSize;

    fn image(width: usize, height: usize, data: Vec<u8>) -> Result<Image<u8, 1>, ImageError> {
        Image::new(ImageSize { width, height }, data)
    }

    fn thin(src: &Image<u8, 1>, config: &ThinningConfig) -> Result<Image<u8, 1>, ThinningError> {
        let mut dst = Image::from_size_val(src.size(), 0)?;
        graph_based_thinning(src, &mut dst, config)?;
        Ok(dst)
    }

    #[test]
    fn empty_image_returns_immediately() -> Result<(), ThinningError> {
        let src = image(4, 3, vec![0; 12])?;
        let mut dst = image(4, 3, vec![5; 12])?;
        let stats = graph_based_thinning_with_stats(&src, &mut dst, &ThinningConfig::default())?;
        assert_eq!(stats, ThinningStats::default());
        assert_eq!(dst.count_nonzero(), 0);
        Ok(())
    }

    #[test]
    fn block_keeps_its_bottom_row() -> Result<(), ThinningError> {
        #[rustfmt::skip]
        let src = image(5, 5, vec![
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 1, 2, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ])?;
        let dst = thin(&src, &ThinningConfig::default())?;

        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(dst.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn square_keeps_two_pixels() -> Result<(), ThinningError> {
        #[rustfmt::skip]
        let src = image(4, 4, vec![
            0, 0, 0, 0,
            0, 1, 1, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ])?;
        let dst = thin(&src, &ThinningConfig::default())?;
        assert_eq!(dst.count_nonzero(), 2);
        assert_eq!(dst.get([2, 1, 0]), Some(&1));
        assert_eq!(dst.get([2, 2, 0]), Some(&1));
        Ok(())
    }

    #[test]
    fn line_erodes_without_end_points() -> Result<(), ThinningError> {
        let src = image(5, 1, vec![1; 5])?;
        let config = ThinningConfig {
            preserve_end_points: false,
            ..Default::default()
        };
        let dst = thin(&src, &config)?;
        assert_eq!(dst.as_slice(), &[0, 0, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn iteration_cap() -> Result<(), ThinningError> {
        let src = image(3, 3, vec![1; 9])?;
        let mut dst = image(3, 3, vec![0; 9])?;
        let config = ThinningConfig {
            max_iterations: Some(0),
            ..Default::default()
        };
        let stats = graph_based_thinning_with_stats(&src, &mut dst, &config)?;
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.initial_nodes, 9);
        assert_eq!(stats.initial_edges, 20);
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn size_mismatch() -> Result<(), ImageError> {
        let src = image(3, 2, vec![0; 6])?;
        let mut dst = image(2, 3, vec![0; 6])?;
        let res = graph_based_thinning(&src, &mut dst, &ThinningConfig::default());
        assert_eq!(
            res,
            Err(ThinningError::ImageError(ImageError::InvalidImageSize(
                3, 2, 2, 3
            )))
        );
        Ok(())
    }
}
