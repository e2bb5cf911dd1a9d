// union_types/src/common/unit.rs

crate::unions! {
    /// A union with exactly one value.
    #[union_type]
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Unit {
        pub fn unit() -> Self;
    }
}
