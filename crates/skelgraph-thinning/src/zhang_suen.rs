use num_traits::Zero;
use skelgraph_image::{Image, ImageError};
use skelgraph_imgproc::padding::{crop_padding, pad_constant, Padding2D};

use crate::error::ThinningError;

// (row, col) offsets clockwise from north
const CLOCKWISE: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

const N: usize = 0;
const E: usize = 2;
const S: usize = 4;
const W: usize = 6;

/// The 8 neighbours of `(x, y)` as foreground flags, clockwise from north.
fn ring<T: Zero>(img: &Image<T, 1>, x: usize, y: usize) -> Result<[bool; 8], ThinningError> {
    if x == 0 || y == 0 || x + 1 >= img.width() || y + 1 >= img.height() {
        return Err(ThinningError::BorderPixel { x, y });
    }

    let data = img.as_slice();
    let cols = img.cols();
    Ok(CLOCKWISE.map(|(dr, dc)| {
        let r = (y as isize + dr) as usize;
        let c = (x as isize + dc) as usize;
        !data[r * cols + c].is_zero()
    }))
}

fn transitions(ring: &[bool; 8]) -> usize {
    (0..8).filter(|&k| !ring[k] && ring[(k + 1) % 8]).count()
}

/// Number of foreground pixels among the 8 neighbours of `(x, y)`.
///
/// # Errors
///
/// Returns [`ThinningError::BorderPixel`] if the pixel lies on the outermost ring.
pub fn b_score<T: Zero>(img: &Image<T, 1>, x: usize, y: usize) -> Result<usize, ThinningError> {
    Ok(ring(img, x, y)?.iter().filter(|&&p| p).count())
}

/// Number of background to foreground transitions around `(x, y)`.
///
/// The neighbours are walked clockwise starting and ending at north.
///
/// # Errors
///
/// Returns [`ThinningError::BorderPixel`] if the pixel lies on the outermost ring.
pub fn a_score<T: Zero>(img: &Image<T, 1>, x: usize, y: usize) -> Result<usize, ThinningError> {
    Ok(transitions(&ring(img, x, y)?))
}

fn touches_border<T: Zero>(img: &Image<T, 1>) -> bool {
    let (rows, cols) = (img.rows(), img.cols());
    let data = img.as_slice();
    let fg = |r: usize, c: usize| !data[r * cols + c].is_zero();
    (0..cols).any(|c| fg(0, c) || fg(rows - 1, c)) || (0..rows).any(|r| fg(r, 0) || fg(r, cols - 1))
}

/// One sub-step over an image with a background frame. Returns whether a pixel was cleared.
fn sub_step(skeleton: &mut [bool], rows: usize, cols: usize, first: bool) -> bool {
    let mut marked = Vec::new();

    for r in 1..rows - 1 {
        for c in 1..cols - 1 {
            if !skeleton[r * cols + c] {
                continue;
            }
            let p = CLOCKWISE.map(|(dr, dc)| {
                skeleton[(r as isize + dr) as usize * cols + (c as isize + dc) as usize]
            });

            let b = p.iter().filter(|&&x| x).count();
            if !(2..=6).contains(&b) || transitions(&p) != 1 {
                continue;
            }

            let keep = if first {
                (p[N] && p[E] && p[S]) || (p[E] && p[S] && p[W])
            } else {
                (p[N] && p[E] && p[W]) || (p[N] && p[S] && p[W])
            };
            if !keep {
                marked.push(r * cols + c);
            }
        }
    }

    for &i in &marked {
        skeleton[i] = false;
    }
    !marked.is_empty()
}

/// Thin a binary image with the two sub-step algorithm of Zhang and Suen.
///
/// Non-zero pixels are foreground. The surviving pixels keep their value in
/// `dst` and every other pixel is set to zero. An image whose foreground
/// touches the border is framed with background while it is thinned.
///
/// # Arguments
///
/// * `src` - The binary input image.
/// * `dst` - The output image, of the same size as `src`.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
///
/// # Examples
///
/// ```
/// use skelgraph_image::{Image, ImageSize};
/// use skelgraph_thinning::zhang_suen_thinning;
///
/// let src = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 1).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// zhang_suen_thinning(&src, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
/// ```
pub fn zhang_suen_thinning<T>(src: &Image<T, 1>, dst: &mut Image<T, 1>) -> Result<(), ThinningError>
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

    if src.as_slice().is_empty() {
        return Ok(());
    }

    let padding = Padding2D::uniform(if touches_border(src) { 1 } else { 0 });
    let mut framed = Image::<T, 1>::from_size_val(padding.padded_size(src.size()), T::zero())?;
    pad_constant(src, &mut framed, padding, [T::zero()])?;

    let (rows, cols) = (framed.rows(), framed.cols());
    let mut skeleton: Vec<bool> = framed.as_slice().iter().map(|x| !x.is_zero()).collect();

    if rows >= 3 && cols >= 3 {
        let mut iterations = 0;
        loop {
            let first = sub_step(&mut skeleton, rows, cols, true);
            let second = sub_step(&mut skeleton, rows, cols, false);
            iterations += 1;
            if !(first || second) {
                break;
            }
        }
        log::debug!("zhang_suen_thinning: converged after {iterations} iterations");
    }

    framed
        .as_slice_mut()
        .iter_mut()
        .zip(skeleton)
        .for_each(|(px, keep)| {
            if !keep {
                *px = T::zero();
            }
        });

    crop_padding(&framed, dst, padding)?;

    Ok(())
}
