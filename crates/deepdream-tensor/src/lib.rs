#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The tensor is an owned, contiguous, row-major buffer with a compile-time
//! number of dimensions. Images are built on top of [`Tensor3`].
//!
//! ```rust
//! use deepdream_tensor::Tensor;
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let tensor = Tensor::<f32, 2>::from_shape_vec([2, 3], data).unwrap();
//!
//! assert_eq!(tensor.get([0, 0]), Some(&1.0));
//! assert_eq!(tensor.get([1, 2]), Some(&6.0));
//! assert_eq!(tensor.strides, [3, 1]);
//! ```

/// tensor module containing the tensor implementation and its error type.
pub mod tensor;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;
