#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use deepdream_tensor as tensor;

#[doc(inline)]
pub use deepdream_image as image;

#[doc(inline)]
pub use deepdream_imgproc as imgproc;

#[doc(inline)]
pub use deepdream_io as io;

#[doc(inline)]
pub use deepdream_nn as nn;

#[doc(inline)]
pub use deepdream_dream as dream;
