use axum::{
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

pub fn app() -> Router {
    Router::new()
        .route("/get", get(plain_ok))
        .route("/headers", get(echo_headers))
        .route("/post", post(echo_body))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn plain_ok() -> &'static str {
    "OK"
}

/// Reflect the request headers back as a JSON object. Header names arrive
/// lowercased, which is what clients should match against.
async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let mut map = Map::new();
    for (name, value) in &headers {
        map.insert(
            name.as_str().to_string(),
            Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }
    Json(Value::Object(map))
}

async fn echo_body(body: String) -> String {
    body
}
