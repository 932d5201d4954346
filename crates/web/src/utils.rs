/// Returns early with `$error` when `$predicate` does not hold.
///
/// ```ignore
/// ensure!(self.writable, ResponseError::NotWritable);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
