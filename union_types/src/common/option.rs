// union_types/src/common/option.rs

crate::unions! {
    /// An optional value. `none` is the default case.
    #[union_type]
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Option<T> {
        pub fn none() -> Self;
        pub fn some(value: T) -> Self;

        pub fn is_some(&self) -> bool {
            self.case() == OptionCase::Some
        }

        pub fn is_none(&self) -> bool {
            self.case() == OptionCase::None
        }

        /// The contained value, or `fallback`.
        pub fn default_value(self, fallback: T) -> T {
            self.match_with(|| fallback, |value| value)
        }

        /// The contained value, or the result of `fallback`.
        pub fn default_with(self, fallback: impl FnOnce() -> T) -> T {
            self.match_with(fallback, |value| value)
        }

        pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Option<U> {
            self.match_with(Option::none, |value| Option::some(f(value)))
        }

        pub fn bind<U>(self, f: impl FnOnce(T) -> Option<U>) -> Option<U> {
            self.match_with(Option::none, f)
        }
    }
}

impl<T> From<::core::option::Option<T>> for Option<T> {
    fn from(value: ::core::option::Option<T>) -> Self {
        match value {
            ::core::option::Option::Some(value) => Self::some(value),
            ::core::option::Option::None => Self::none(),
        }
    }
}

impl<T> From<Option<T>> for ::core::option::Option<T> {
    fn from(value: Option<T>) -> Self {
        value.match_with(|| None, Some)
    }
}
