/// unwrap the result of a database insert. a duplicate key is logged and turns into `None`,
/// any other error is returned from the calling function.
macro_rules! db_skip_duplicate {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => Some(e),
            Err($crate::errors::Error::DuplicateKeyError { key, .. }) => {
                warn!(target:$target, "{} '{}' already exists, skipping", $type_str, key);
                None
            }
            Err(error) => {
                error!(target:$target, "Error saving {}. (error: {})", $type_str, error);
                return Err(error);
            }
        }
    }
}

pub(crate) use db_skip_duplicate;
