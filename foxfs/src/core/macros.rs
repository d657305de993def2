// SPDX-License-Identifier: MIT

/// `From<$src>` for `$dst`, wrapping the source in `$dst::$variant`.
#[macro_export]
macro_rules! impl_error_from {
    ($($src:ty => $dst:ident :: $variant:ident),+ $(,)?) => {
        $(
            impl From<$src> for $dst {
                #[inline]
                fn from(e: $src) -> Self {
                    $dst::$variant(e)
                }
            }
        )+
    };
}

/// `From<&'static str>` for each listed error, through its `Other` variant.
#[macro_export]
macro_rules! impl_error_from_msg {
    ($($dst:ident),+ $(,)?) => {
        $(
            impl From<&'static str> for $dst {
                #[inline]
                fn from(msg: &'static str) -> Self {
                    $dst::Other(msg)
                }
            }
        )+
    };
}

/// Returns `Err($err.into())` unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
