use skelgraph_image::ImageError;

/// Errors that can occur while thinning an image.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ThinningError {
    /// Error related to the input or output image.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// A 3x3 neighbourhood was requested for a pixel on the outermost ring.
    #[error("Pixel ({x}, {y}) lies on the image border and has no full neighbourhood")]
    BorderPixel {
        /// Column of the pixel.
        x: usize,
        /// Row of the pixel.
        y: usize,
    },
}
