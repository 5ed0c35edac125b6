use skelgraph_image::{Image, ImageError, ImageSize};

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same amount of padding on all four sides.
    pub const fn uniform(amount: usize) -> Self {
        Self {
            top: amount,
            bottom: amount,
            left: amount,
            right: amount,
        }
    }

    /// Size of an image of size `size` after this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use skelgraph_image::ImageSize;
    /// use skelgraph_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

/// Surround an image with a constant frame.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image, of the padded size.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `constant_value` - The sample value of the frame, one per channel.
///
/// # Errors
///
/// Returns an error if the size of `dst` is not the size of `src` grown by `padding`.
///
/// # Example
///
/// ```rust
/// use skelgraph_image::{Image, ImageSize};
/// use skelgraph_imgproc::padding::{pad_constant, Padding2D};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 3 }, 9).unwrap();
///
/// pad_constant(&src, &mut dst, Padding2D::uniform(1), [0]).unwrap();
///
/// assert_eq!(dst.as_slice(), &[0, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0]);
/// ```
pub fn pad_constant<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy,
{
    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let old_stride = src.width() * C;
    let new_stride = dst.width() * C;

    let new_data = dst.as_slice_mut();
    new_data
        .chunks_exact_mut(C)
        .for_each(|chunk| chunk.copy_from_slice(&constant_value));

    if src.as_slice().is_empty() {
        return Ok(());
    }

    // copy old image data as center of new image data
    let row_offset = padding.top * new_stride + padding.left * C;

    for (src_row, dst_row) in src
        .as_slice()
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    Ok(())
}

/// Strip a frame added by [`pad_constant`].
///
/// # Arguments
///
/// * `src` - The padded image.
/// * `dst` - The destination image, of the unpadded size.
/// * `padding` - The padding that was applied to obtain `src`.
///
/// # Errors
///
/// Returns an error if the size of `src` is not the size of `dst` grown by `padding`.
pub fn crop_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
) -> Result<(), ImageError>
where
    T: Copy,
{
    if !padding.validate_size(dst.size(), src.size()) {
        let expected = padding.padded_size(dst.size());
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            expected.width,
            expected.height,
        ));
    }

    let old_stride = src.width() * C;
    let new_stride = dst.width() * C;

    if dst.as_slice().is_empty() {
        return Ok(());
    }

    let row_offset = padding.top * old_stride + padding.left * C;

    for (src_row, dst_row) in src.as_slice()[row_offset..]
        .chunks(old_stride)
        .zip(dst.as_slice_mut().chunks_exact_mut(new_stride))
    {
        dst_row.copy_from_slice(&src_row[..new_stride]);
    }

    Ok(())
}
