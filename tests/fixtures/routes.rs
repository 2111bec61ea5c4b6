use axum::{routing::get, Json, Router};

/*
@swg_begin
path: /health
method: get
summary: Service liveness probe
responses:
  200:
    description: Service is up
@swg_end
*/
async fn health() -> &'static str {
    "ok"
}

/*
@swg_begin
path: /languages
method: get
summary: List the languages snippets can be written in
responses:
  200:
    description: Supported language names
    schema:
      type: array
      items:
        type: string
@swg_end
*/
async fn languages() -> Json<Vec<&'static str>> {
    Json(vec!["python", "rust", "go"])
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/languages", get(languages))
}
