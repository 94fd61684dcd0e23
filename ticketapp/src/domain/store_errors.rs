//! Mapping from key-value store failures to domain errors.

use serde_json::json;

use super::Error;
use super::ports::KeyValueStoreError;

pub(crate) fn map_store_error(error: KeyValueStoreError) -> Error {
    match error {
        KeyValueStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("key-value store unavailable: {message}"))
        }
        KeyValueStoreError::Read { key, message } => {
            Error::internal(format!("failed to read stored value: {message}"))
                .with_details(json!({ "key": key }))
        }
        KeyValueStoreError::Write { key, message } => {
            Error::internal(format!("failed to write stored value: {message}"))
                .with_details(json!({ "key": key }))
        }
        KeyValueStoreError::Corrupt { key } => {
            Error::internal("stored value could not be decoded")
                .with_details(json!({ "key": key }))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(KeyValueStoreError::unavailable("no dir"), ErrorCode::ServiceUnavailable)]
    #[case(KeyValueStoreError::read("k", "eio"), ErrorCode::InternalError)]
    #[case(KeyValueStoreError::write("k", "enospc"), ErrorCode::InternalError)]
    #[case(KeyValueStoreError::corrupt("k"), ErrorCode::InternalError)]
    fn maps_each_variant(#[case] error: KeyValueStoreError, #[case] expected: ErrorCode) {
        assert_eq!(map_store_error(error).code(), expected);
    }
}
