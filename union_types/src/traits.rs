// union_types/src/traits.rs

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use crate::UnionError;

/// The tag enum generated next to every union: one fieldless variant per
/// case, numbered from zero in case order.
pub trait CaseTag:
    Copy + Eq + Ord + Hash + Debug + Display + FromStr<Err = UnionError> + 'static
{
    /// Every case, in index order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn index(self) -> usize;

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Implemented by every generated union.
pub trait UnionType {
    type Case: CaseTag;

    /// Module path and type name as declared, e.g. `geometry::Shape`.
    const TYPE_NAME: &'static str;

    /// The active case.
    fn case(&self) -> Self::Case;

    fn case_name(&self) -> &'static str {
        self.case().name()
    }

    fn case_index(&self) -> usize {
        self.case().index()
    }
}
