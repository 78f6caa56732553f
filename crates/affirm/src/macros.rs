//! Call-site macros converting each argument with `Into<Value>`.

/// Check against the built-in synchronous vocabulary.
///
/// ```text
/// expect!(10, "to be greater than", 5)?;
/// expect!(vec![1, 2, 3], "not to contain", 4)?;
/// ```
#[macro_export]
macro_rules! expect {
    ($($arg:expr),+ $(,)?) => {
        $crate::expect(&[$($crate::Value::from($arg)),+])
    };
}

/// Check against the built-in asynchronous vocabulary.
///
/// ```text
/// expect_async!(pending, "to resolve with", 4).await?;
/// ```
#[macro_export]
macro_rules! expect_async {
    ($($arg:expr),+ $(,)?) => {
        $crate::expect_async(vec![$($crate::Value::from($arg)),+])
    };
}
