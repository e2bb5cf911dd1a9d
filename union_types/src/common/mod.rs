// union_types/src/common/mod.rs

//! General-purpose unions built with [`unions!`](crate::unions).

mod option;
mod result;
mod unit;

pub use option::{Option, OptionCase};
pub use result::{Result, ResultCase};
pub use unit::{Unit, UnitCase};
