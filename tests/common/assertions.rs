//! Assertion macros shared by the integration tests

/// Assert that a result is an error, optionally matching a pattern
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
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

/// Assert that a response carries `name` with exactly `value`
#[macro_export]
macro_rules! assert_header {
    ($response:expr, $name:expr, $value:expr) => {
        assert_eq!(
            $response
                .headers()
                .get($name)
                .and_then(|v| v.to_str().ok()),
            Some($value),
            "header {}",
            $name
        );
    };
}
