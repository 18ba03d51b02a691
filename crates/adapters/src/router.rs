//! Item request router.
//!
//! Maps `/items` requests onto [`ItemStore`] calls and store outcomes onto
//! status codes. Each handler validates its input first and then issues
//! exactly one store call.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, error, Level};

use itemsvc_store::item::is_blank;
use itemsvc_store::{Item, ItemId, ItemStore, StoreError};

pub const INVALID_ID: &str = "Invalid id";
pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const MISSING_NAME: &str = "Missing or empty 'name' query parameter";
pub const ITEM_DELETED: &str = "Item deleted";

/// Route table as `(method, path, description)`.
pub const ROUTES: &[(&str, &str, &str)] = &[
    ("GET", "/items", "List all items"),
    ("GET", "/items/{id}", "Fetch one item by id"),
    ("POST", "/items?name=<text>", "Create an item"),
    ("DELETE", "/items/{id}", "Delete an item by id"),
];

/// Shared state handed to every handler
pub type SharedStore = Arc<ItemStore>;

/// Query parameter naming the item to create
pub const NAME_PARAM: &str = "name";

/// Request outcomes that are not a success body
#[derive(Debug)]
pub enum ApiError {
    /// Path id segment is not an integer
    InvalidId(String),
    NotFound(ItemId),
    MissingName,
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BlankName => ApiError::MissingName,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidId(raw) => {
                debug!(raw = %raw, "Rejected non-integer id");
                (StatusCode::BAD_REQUEST, INVALID_ID).into_response()
            }
            ApiError::NotFound(id) => {
                debug!(id, "Item not found");
                (StatusCode::NOT_FOUND, ITEM_NOT_FOUND).into_response()
            }
            ApiError::MissingName => {
                debug!("Rejected create without a usable name");
                (StatusCode::BAD_REQUEST, MISSING_NAME).into_response()
            }
            ApiError::Store(err) => {
                error!("Store failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

/// Creates the item router over `store`, with request tracing.
pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", get(get_item).delete(delete_item))
        .with_state(store)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn parse_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse::<ItemId>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Id from the path segment. A segment axum cannot decode (e.g. invalid
/// UTF-8) is treated like any other non-integer id.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<ItemId, ApiError> {
    match path {
        Ok(Path(raw)) => parse_id(&raw),
        Err(rejection) => Err(ApiError::InvalidId(rejection.body_text())),
    }
}

/// First `name` value in the query string, if any.
fn first_name(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(key, _)| key == NAME_PARAM)
        .map(|(_, value)| value)
}

async fn list_items(State(store): State<SharedStore>) -> Json<Vec<Item>> {
    Json(store.list().await)
}

async fn get_item(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = path_id(path)?;
    store.get(id).await.map(Json).ok_or(ApiError::NotFound(id))
}

async fn create_item(
    State(store): State<SharedStore>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let name = first_name(params)
        .filter(|n| !is_blank(n))
        .ok_or(ApiError::MissingName)?;

    let item = store.create(name).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn delete_item(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let id = path_id(path)?;
    if store.delete(id).await {
        Ok((StatusCode::OK, ITEM_DELETED))
    } else {
        Err(ApiError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id("-3").unwrap(), -3);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("99999999999"), Err(ApiError::InvalidId(_))));
    }

    #[test]
    fn test_first_name_takes_first_value() {
        let params = vec![
            ("other".to_string(), "x".to_string()),
            ("name".to_string(), "a".to_string()),
            ("name".to_string(), "b".to_string()),
        ];
        assert_eq!(first_name(params).as_deref(), Some("a"));
        assert_eq!(first_name(Vec::new()), None);
    }

    #[tokio::test]
    async fn test_undecodable_id_segment_is_invalid_id() {
        let app = create_router(Arc::new(ItemStore::seeded()));

        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(&app, method, "/items/%FF").await;
            assert_eq!((status, body.as_str()), (StatusCode::BAD_REQUEST, INVALID_ID));
        }
    }

    #[tokio::test]
    async fn test_repeated_name_uses_first_value() {
        let store = Arc::new(ItemStore::new());
        let app = create_router(Arc::clone(&store));

        let (status, body) = send(&app, Method::POST, "/items?name=a&name=b").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, r#"{"id":1,"name":"a"}"#);
        assert_eq!(store.list().await, vec![Item::new(1, "a")]);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let app = create_router(Arc::new(ItemStore::new()));
        let (status, body) = send(&app, Method::GET, "/items").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_list_sets_json_content_type() {
        let app = create_router(Arc::new(ItemStore::seeded()));
        let request = Request::builder().uri("/items").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn test_blank_name_does_not_touch_store() {
        let store = Arc::new(ItemStore::new());
        let app = create_router(Arc::clone(&store));

        for uri in ["/items", "/items?name=", "/items?name=%20%20%20"] {
            let (status, body) = send(&app, Method::POST, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, MISSING_NAME);
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_invalid_and_missing_ids() {
        let app = create_router(Arc::new(ItemStore::seeded()));

        let (status, body) = send(&app, Method::DELETE, "/items/abc").await;
        assert_eq!((status, body.as_str()), (StatusCode::BAD_REQUEST, INVALID_ID));

        let (status, body) = send(&app, Method::DELETE, "/items/99").await;
        assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, ITEM_NOT_FOUND));

        let (status, body) = send(&app, Method::DELETE, "/items/3").await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, ITEM_DELETED));
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_server_error() {
        let store = ItemStore::with_items([Item::new(ItemId::MAX, "last")]);
        let app = create_router(Arc::new(store));

        let (status, _) = send(&app, Method::POST, "/items?name=more").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unsupported_method_uses_framework_default() {
        let app = create_router(Arc::new(ItemStore::new()));
        let (status, _) = send(&app, Method::PUT, "/items/1").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
