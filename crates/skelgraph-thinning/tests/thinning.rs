use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skelgraph_image::{Image, ImageError, ImageSize};
use skelgraph_thinning::neighbourhood::Compass;
use skelgraph_thinning::rules::{self, connectivity_number};
use skelgraph_thinning::{
    graph_based_thinning, graph_based_thinning_with_stats, thin_graph, zhang_suen_thinning,
    Node, PixelGraph, ThinningConfig, ThinningError,
};

/// Parse an ASCII raster, `#` being foreground.
fn raster(rows: &[&str]) -> Result<Image<u8, 1>, ImageError> {
    let width = rows.first().map_or(0, |r| r.len());
    let data = rows
        .iter()
        .flat_map(|r| r.bytes().map(|b| u8::from(b == b'#')))
        .collect();
    Image::new(
        ImageSize {
            width,
            height: rows.len(),
        },
        data,
    )
}

fn thin(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ThinningError> {
    let mut dst = Image::from_size_val(src.size(), 0)?;
    graph_based_thinning(src, &mut dst, &ThinningConfig::default())?;
    Ok(dst)
}

fn random_image(rng: &mut StdRng, width: usize, height: usize, density: f64) -> Image<u8, 1> {
    let data = (0..width * height)
        .map(|_| {
            if rng.random_bool(density) {
                rng.random_range(1..=255)
            } else {
                0
            }
        })
        .collect();
    Image::new(ImageSize { width, height }, data).unwrap()
}

fn is_subset(thinned: &Image<u8, 1>, src: &Image<u8, 1>) -> bool {
    thinned
        .as_slice()
        .iter()
        .zip(src.as_slice())
        .all(|(&t, &s)| t == 0 || t == s)
}

#[test]
fn solid_block_keeps_a_stub() -> Result<(), ThinningError> {
    let src = raster(&[".....", ".###.", ".###.", ".###.", "....."])?;
    let dst = thin(&src)?;
    assert_eq!(
        dst,
        raster(&[".....", ".....", ".....", ".###.", "....."])?
    );
    assert_eq!(thin(&dst)?, dst);
    Ok(())
}

#[test]
fn one_pixel_lines_are_unchanged() -> Result<(), ThinningError> {
    let shapes = [
        raster(&["......", ".####.", "......"])?,
        raster(&["...", ".#.", ".#.", ".#.", "..."])?,
        raster(&["......", ".#....", "..#...", "...#..", "....#.", "......"])?,
        raster(&["......", "....#.", "...#..", "..#...", ".#....", "......"])?,
        raster(&["########"])?,
    ];
    for src in shapes {
        assert_eq!(thin(&src)?, src);
    }
    Ok(())
}

#[test]
fn background_only() -> Result<(), ThinningError> {
    let src = raster(&["....", "....", "...."])?;
    let mut dst = Image::from_size_val(src.size(), 1)?;
    let stats = graph_based_thinning_with_stats(&src, &mut dst, &ThinningConfig::default())?;
    assert_eq!(stats.iterations, 0);
    assert_eq!(dst.count_nonzero(), 0);
    Ok(())
}

#[test]
fn filled_square() -> Result<(), ThinningError> {
    let src = raster(&["....", ".##.", ".##.", "...."])?;
    let dst = thin(&src)?;
    let kept = dst.count_nonzero();
    assert!(kept >= 1 && kept < 4);
    assert!(is_subset(&dst, &src));
    assert_eq!(thin(&dst)?, dst);
    Ok(())
}

#[test]
fn t_shape_keeps_its_branch_point() -> Result<(), ThinningError> {
    let src = raster(&[
        ".......",
        ".#####.",
        "...#...",
        "...#...",
        "...#...",
        ".......",
    ])?;
    let dst = thin(&src)?;
    assert_eq!(dst, src);

    let graph = PixelGraph::from_image(&dst);
    let mut thinned = graph.clone();
    rules::delete_diag_at_concaves(&mut thinned);
    let branch = Node::new(1, 3);
    assert_eq!(connectivity_number(&thinned.edge_ring(&branch)), 3);
    Ok(())
}

#[test]
fn diagonal_with_orthogonal_branch() -> Result<(), ThinningError> {
    let src = raster(&[
        ".......",
        ".#.....",
        "..#....",
        "...#...",
        "...##..",
        "...#.#.",
        "...#...",
        ".......",
    ])?;
    let dst = thin(&src)?;
    assert_eq!(dst, src);
    assert_eq!(thin(&dst)?, dst);

    // the concave chords around (4, 3) go, leaving it as the junction
    let mut graph = PixelGraph::from_image(&dst);
    rules::delete_diag_at_concaves(&mut graph);
    assert_eq!(connectivity_number(&graph.edge_ring(&Node::new(4, 3))), 3);
    Ok(())
}

#[test]
fn original_values_are_kept() -> Result<(), ThinningError> {
    let mut src = raster(&["......", ".####.", "......"])?;
    src.set_pixel(2, 1, 0, 200)?;
    let dst = thin(&src)?;
    assert_eq!(dst.get_pixel(2, 1, 0)?, 200);
    assert_eq!(dst.get_pixel(1, 1, 0)?, 1);
    Ok(())
}

#[test]
fn rules_keep_the_graph_consistent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let src = random_image(&mut rng, 12, 10, 0.55);
        let mut graph = PixelGraph::from_image(&src);

        for _ in 0..4 {
            let before = graph.graph_size();
            let outcome = rules::delete_diag_at_concaves(&mut graph);
            assert!(graph.is_consistent());
            assert_eq!(graph.graph_size(), before - outcome.removed_edges);

            let before = graph.graph_size();
            let outcome = rules::delete_border_nodes(&mut graph, true);
            assert!(graph.is_consistent());
            assert_eq!(
                graph.graph_size(),
                before - outcome.removed_edges - outcome.removed_nodes
            );

            rules::delete_extra_diag_edges(&mut graph);
            assert!(graph.is_consistent());
            rules::delete_extra_vert_and_hor_edges(&mut graph);
            assert!(graph.is_consistent());

            let before = graph.graph_size();
            let outcome = rules::delete_intersections(&mut graph);
            assert!(graph.is_consistent());
            assert_eq!(
                graph.graph_size() + outcome.removed_edges,
                before + outcome.added_edges
            );
        }
    }
}

#[test]
fn border_peel_removes_every_node_of_connectivity_one() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let src = random_image(&mut rng, 10, 10, 0.6);
        let mut graph = PixelGraph::from_image(&src);
        rules::delete_diag_at_concaves(&mut graph);

        // replay the pass, node by node
        let mut replay = graph.clone();
        let mut expected_removed = Vec::new();
        let nodes: Vec<Node> = replay.nodes().iter().copied().collect();
        for node in nodes {
            let ring = replay.edge_ring(&node);
            if connectivity_number(&ring) == 1 && ring.degree() >= 2 {
                replay.remove_node(&node);
                expected_removed.push(node);
            }
        }

        let outcome = rules::delete_border_nodes(&mut graph, true);
        assert_eq!(outcome.removed_nodes, expected_removed.len());
        assert_eq!(graph, replay);
        assert!(expected_removed.iter().all(|n| !graph.contains_node(n)));
    }
}

#[test]
fn thinning_properties_on_random_images() -> Result<(), ThinningError> {
    let mut rng = StdRng::seed_from_u64(42);
    for i in 0..30 {
        let (width, height) = (rng.random_range(1..16), rng.random_range(1..16));
        let density = [0.2, 0.5, 0.8][i % 3];
        let src = random_image(&mut rng, width, height, density);

        let mut dst = Image::from_size_val(src.size(), 0)?;
        let stats = graph_based_thinning_with_stats(&src, &mut dst, &ThinningConfig::default())?;

        assert!(is_subset(&dst, &src));
        assert_eq!(dst.count_nonzero(), stats.final_nodes);
        if src.count_nonzero() > 0 {
            assert!(dst.count_nonzero() > 0);
            assert!(stats.iterations >= 1);
        }
        let initial_size = stats.initial_nodes + stats.initial_edges;
        assert!(stats.iterations <= 3 * initial_size + 1);
        assert_eq!(stats.initial_nodes, src.count_nonzero());
    }
    Ok(())
}

#[test]
fn thinning_is_idempotent_on_random_images() -> Result<(), ThinningError> {
    let mut rng = StdRng::seed_from_u64(1234);
    for i in 0..60 {
        let (width, height) = (rng.random_range(2..10), rng.random_range(2..10));
        let density = [0.3, 0.5, 0.8][i % 3];
        let src = random_image(&mut rng, width, height, density);

        let once = thin(&src)?;
        assert_eq!(thin(&once)?, once);
    }
    Ok(())
}

#[test]
fn graph_size_never_grows_across_iterations() {
    let mut rng = StdRng::seed_from_u64(99);
    let step = ThinningConfig {
        max_iterations: Some(1),
        ..Default::default()
    };
    for i in 0..60 {
        let (width, height) = (rng.random_range(2..12), rng.random_range(2..12));
        let density = [0.3, 0.5, 0.8][i % 3];
        let src = random_image(&mut rng, width, height, density);
        let mut graph = PixelGraph::from_image(&src);

        let mut sizes = vec![graph.graph_size()];
        for _ in 0..=sizes[0] {
            assert_eq!(thin_graph(&mut graph, &step), 1);
            let size = graph.graph_size();
            let previous = sizes[sizes.len() - 1];
            sizes.push(size);
            if size == previous {
                break;
            }
        }

        assert_eq!(sizes.last(), sizes.get(sizes.len() - 2));
        assert!(
            sizes.windows(2).all(|w| w[1] <= w[0]),
            "graph size grew: {sizes:?}"
        );
    }
}

#[test]
fn iteration_cap_stops_early() -> Result<(), ThinningError> {
    let src = raster(&[".....", ".###.", ".###.", ".###.", "....."])?;
    let mut dst = Image::from_size_val(src.size(), 0)?;
    let config = ThinningConfig {
        max_iterations: Some(1),
        ..Default::default()
    };
    let stats = graph_based_thinning_with_stats(&src, &mut dst, &config)?;
    assert_eq!(stats.iterations, 1);
    assert!(is_subset(&dst, &src));
    Ok(())
}

#[test]
fn zhang_suen_on_random_images() -> Result<(), ThinningError> {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let src = random_image(&mut rng, 14, 9, 0.6);
        let mut dst = Image::from_size_val(src.size(), 0)?;
        zhang_suen_thinning(&src, &mut dst)?;
        assert!(is_subset(&dst, &src));

        let mut again = Image::from_size_val(src.size(), 0)?;
        zhang_suen_thinning(&dst, &mut again)?;
        assert!(is_subset(&again, &dst));
    }
    Ok(())
}

#[test]
fn compass_offsets_match_adjacency() {
    let centre = Node::new(0, 0);
    for dir in Compass::ALL {
        let (dr, dc) = dir.offset();
        assert_eq!(centre.adjacent(dir), Node::new(dr, dc));
        assert_eq!(centre.adjacent(dir).adjacent(dir.rotated(2)), centre);
    }
}
