use num_traits::Zero;
use std::cmp::PartialOrd;

use skelgraph_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to an image.
///
/// Samples strictly greater than `threshold` become `max_value`, all others zero.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of the same size as the input.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value to use when the input value is greater than the threshold.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
///
/// # Examples
///
/// ```
/// use skelgraph_image::{Image, ImageSize};
/// use skelgraph_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    check_same_size(src, dst)?;

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

/// Apply an inverse binary threshold to an image.
///
/// Samples less than or equal to `threshold` become `max_value`, all others
/// zero. Useful for dark ink on a bright background.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of the same size as the input.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value to use when the input value is not greater than the threshold.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
pub fn threshold_binary_inverse<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    check_same_size(src, dst)?;

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            T::zero()
        } else {
            max_value
        };
    });

    Ok(())
}

fn check_same_size<T1, T2, const C: usize>(
    src: &Image<T1, C>,
    dst: &Image<T2, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skelgraph_image::ImageSize;

    #[test]
    fn threshold_binary_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 127, 128, 255, 10, 200],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        threshold_binary(&image, &mut dst, 127, 1)?;
        assert_eq!(dst.as_slice(), &[0, 0, 1, 1, 0, 1]);

        Ok(())
    }

    #[test]
    fn threshold_binary_inverse_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 127, 128, 255, 10, 200],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        threshold_binary_inverse(&image, &mut dst, 127, 255)?;
        assert_eq!(dst.as_slice(), &[255, 255, 0, 0, 255, 0]);

        Ok(())
    }

    #[test]
    fn threshold_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;

        let res = threshold_binary(&image, &mut dst, 0, 1);
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 2, 2, 3)));

        Ok(())
    }
}
