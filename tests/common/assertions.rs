//! Custom assertion macros and utilities
//!
//! Provides assertion macros for the API's JSON error body and better
//! failure messages.

/// Assert that a response failed with `status` and the given `code`
///
/// Checks the status line and the `code` and `status` fields of the JSON
/// error body together, so a 403 for a non-member is never mistaken for a
/// 403 for insufficient progress.
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr, $code:expr) => {{
        let response = $response;
        response.assert_status($status);
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["code"], $code,
            "Expected error code '{}', got body {}",
            $code, body
        );
        assert_eq!(body["status"], $status.as_u16());
        body
    }};
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
