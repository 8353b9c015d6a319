//! Custom assertion macros
//!
//! Wrappers that print the offending value on failure.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a JSON error body carries the given status
#[macro_export]
macro_rules! assert_error_body {
    ($response:expr, $status:expr) => {
        assert_eq!($response.status_code(), $status);
        let body: serde_json::Value = $response.json();
        assert_eq!(body["status"], $status.as_u16());
        assert!(body["error"].is_string(), "error message missing: {}", body);
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
