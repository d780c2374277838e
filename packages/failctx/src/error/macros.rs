//! Macros for error creation and handling

/// Create an [`Error`](crate::Error) from format arguments, traced from the
/// call site
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::errorf(::std::format_args!($($arg)*))
    };
}

/// Wrap an error with any number of annotators
///
/// `wrap!(err)` is [`wrap`](crate::wrap) with no annotators;
/// `wrap!(err, with_message("load"), with_code(500))` applies them in order.
#[macro_export]
macro_rules! wrap {
    ($err:expr $(,)?) => {
        $crate::wrap($err, ::std::iter::empty::<$crate::Annotator>())
    };
    ($err:expr, $($annotator:expr),+ $(,)?) => {
        $crate::wrap($err, [$($annotator),+])
    };
}

/// Return early with an error built by [`errorf!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return ::std::result::Result::Err(::std::convert::From::from($crate::errorf!($($arg)*)))
    };
}

/// Return early with an error built by [`errorf!`] unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
