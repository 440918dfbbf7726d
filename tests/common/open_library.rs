//! Open Library mock
//!
//! A wiremock server answering `GET /search.json` the way Open Library
//! does, for tests that exercise book search.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock that returns two search hits for any query
pub async fn mock_open_library() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 2,
            "docs": [
                {
                    "key": "/works/OL893415W",
                    "title": "Dune",
                    "author_name": ["Frank Herbert"],
                    "isbn": ["9780441013593"],
                    "cover_i": 11481354,
                    "first_publish_year": 1965
                },
                {
                    "key": "/works/OL45804W",
                    "title": "Dune Messiah"
                }
            ]
        })))
        .mount(&server)
        .await;

    server
}

/// Start a mock whose search endpoint always fails
pub async fn failing_open_library() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}
