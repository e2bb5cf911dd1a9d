// union_types/src/common/result.rs

crate::unions! {
    /// Either a value or an error. There is no default case.
    #[union_type]
    #[derive(Clone, PartialEq, Eq, Hash)]
    pub struct Result<T, E> {
        pub fn ok(value: T) -> Self;
        pub fn error(value: E) -> Self;

        pub fn is_ok(&self) -> bool {
            self.case() == ResultCase::Ok
        }

        pub fn is_error(&self) -> bool {
            self.case() == ResultCase::Error
        }

        pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Result<U, E> {
            self.match_with(|value| Result::ok(f(value)), Result::error)
        }

        /// Chains a fallible step onto a success.
        pub fn bind<U>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<U, E> {
            self.match_with(f, Result::error)
        }

        /// Chains a recovery step onto a failure.
        pub fn bind_error<F>(self, f: impl FnOnce(E) -> Result<T, F>) -> Result<T, F> {
            self.match_with(Result::ok, f)
        }
    }
}

impl<T, E> From<::core::result::Result<T, E>> for Result<T, E> {
    fn from(value: ::core::result::Result<T, E>) -> Self {
        match value {
            ::core::result::Result::Ok(value) => Self::ok(value),
            ::core::result::Result::Err(error) => Self::error(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for ::core::result::Result<T, E> {
    fn from(value: Result<T, E>) -> Self {
        value.match_with(Ok, Err)
    }
}
