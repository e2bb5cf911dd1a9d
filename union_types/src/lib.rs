//! Closed sum types declared as a list of constructor signatures.
//!
//! ```
//! union_types::unions! {
//!     #[union_type]
//!     #[derive(Clone, PartialEq)]
//!     pub struct Shape {
//!         pub fn empty() -> Self;
//!         pub fn circle(radius: f64) -> Self;
//!         pub fn rect(width: f64, height: f64) -> Self;
//!     }
//! }
//!
//! let shape = Shape::rect(2.0, 3.0);
//! assert_eq!(shape.case(), ShapeCase::Rect);
//! assert_eq!(format!("{shape:?}"), "Rect(2.0, 3.0)");
//!
//! let area = shape.match_with(|| 0.0, |r| 3.0 * r * r, |w, h| w * h);
//! assert_eq!(area, 6.0);
//! assert_eq!(Shape::default(), Shape::empty());
//! ```
//!
//! Every union gets a tag enum (`ShapeCase`), exhaustive and partial
//! matchers (`match_with`, `match_or`, `do_with`, `do_or`), a `Debug` impl
//! and, with the `serde` feature, a JSON representation tagged by a
//! `"$case"` field.

extern crate self as union_types;

pub mod common;
#[cfg(feature = "serde")]
mod de;
mod error;
mod traits;

pub use error::{Result, UnionError};
pub use traits::{CaseTag, UnionType};
pub use union_types_macros::unions;

#[cfg(feature = "serde")]
pub use de::CaseFields;

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "serde")]
    pub use crate::de::CaseFields;
    #[cfg(feature = "serde")]
    pub use serde;
}
