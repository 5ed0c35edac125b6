#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use skelgraph_image as image;

#[doc(inline)]
pub use skelgraph_imgproc as imgproc;

#[doc(inline)]
pub use skelgraph_thinning as thinning;
