use argh::FromArgs;
use std::io::Read;
use std::path::PathBuf;

use skelgraph::{
    image::{Image, ImageError, ImageSize},
    imgproc::threshold,
    thinning::{self, ThinningConfig},
};

#[derive(FromArgs)]
/// Thin an ASCII art raster and print the skeleton
struct Args {
    /// path to the input raster, read from stdin when missing
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// algorithm: graph, zhang-suen (default: graph)
    #[argh(option, short = 'a', default = "String::from(\"graph\")")]
    algorithm: String,

    /// intensity above which a pixel is foreground (default: 4)
    #[argh(option, short = 't', default = "4")]
    threshold: u8,

    /// treat intensities at or below the threshold as ink (dark on light input)
    #[argh(switch)]
    invert: bool,

    /// let lines erode from their end points
    #[argh(switch)]
    erode_end_points: bool,

    /// maximum number of outer iterations of the graph thinning
    #[argh(option)]
    max_iterations: Option<usize>,
}

// '#' is full intensity, digits are intensities, anything else is background
fn intensity(c: char) -> u8 {
    match c {
        '#' => 9,
        '0'..='9' => c as u8 - b'0',
        _ => 0,
    }
}

fn parse_raster(text: &str) -> Result<Image<u8, 1>, Box<dyn std::error::Error>> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut data = Vec::with_capacity(width * lines.len());
    for line in &lines {
        let row: Vec<u8> = line.chars().map(intensity).collect();
        data.extend_from_slice(&row);
        data.resize(data.len() + width - row.len(), 0);
    }

    Ok(Image::new(
        ImageSize {
            width,
            height: lines.len(),
        },
        data,
    )?)
}

fn binarize(raster: &Image<u8, 1>, level: u8, invert: bool) -> Result<Image<u8, 1>, ImageError> {
    let mut binary = Image::from_size_val(raster.size(), 0u8)?;
    if invert {
        threshold::threshold_binary_inverse(raster, &mut binary, level, 1)?;
    } else {
        threshold::threshold_binary(raster, &mut binary, level, 1)?;
    }
    Ok(binary)
}

fn render(img: &Image<u8, 1>) -> String {
    img.as_slice()
        .chunks(img.width().max(1))
        .map(|row| {
            row.iter()
                .map(|&v| if v > 0 { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let raster = parse_raster(&text)?;
    log::info!("read a raster of size {}", raster.size());

    let binary = binarize(&raster, args.threshold, args.invert)?;

    let mut skeleton = Image::from_size_val(raster.size(), 0u8)?;
    match args.algorithm.as_str() {
        "zhang-suen" => thinning::zhang_suen_thinning(&binary, &mut skeleton)?,
        _ => {
            let config = ThinningConfig {
                preserve_end_points: !args.erode_end_points,
                max_iterations: args.max_iterations,
            };
            let stats =
                thinning::graph_based_thinning_with_stats(&binary, &mut skeleton, &config)?;
            log::info!(
                "{} iterations, {} -> {} nodes, {} -> {} edges",
                stats.iterations,
                stats.initial_nodes,
                stats.final_nodes,
                stats.initial_edges,
                stats.final_edges
            );
        }
    }

    println!("{}", render(&skeleton));

    Ok(())
}
