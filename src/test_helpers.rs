//! Local http fixtures shared by the test modules.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::path::Path as FsPath;
use std::sync::{Arc, Mutex};

/// Request log shared between a fixture server and the test
#[derive(Debug, Clone, Default)]
pub struct Hits(Arc<Mutex<Vec<String>>>);

impl Hits {
    pub fn push(&self, hit: impl Into<String>) {
        self.0.lock().unwrap().push(hit.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.all().iter().filter(|h| h.starts_with(prefix)).count()
    }
}

/// Bind `app` to an ephemeral port on localhost and serve it in the background
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    addr
}

/// Html listing page with `links` in its body
pub fn listing_page(links: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head><meta charset="utf-8"><title>Sample galleries</title></head>
  <body>
    <header><a href="/">Home</a><a href="/reviews">Reviews</a></header>
    <main>{}</main>
  </body>
</html>"#,
        links
    )
}

/// Body served for the thumbnail called `name`
pub fn thumbnail_body(name: &str) -> String {
    format!("jpeg bytes of {}", name)
}

/// `/t/:name` serves a thumbnail, `/v2/:name` a different one under the same
/// name, `/gone/:name` is always a 404
pub fn thumbnail_routes(hits: &Hits) -> Router {
    let ok = hits.clone();
    let v2 = hits.clone();
    let gone = hits.clone();
    Router::new()
        .route(
            "/t/:name",
            get(move |Path(name): Path<String>| async move {
                ok.push(format!("/t/{}", name));
                thumbnail_body(&name)
            }),
        )
        .route(
            "/v2/:name",
            get(move |Path(name): Path<String>| async move {
                v2.push(format!("/v2/{}", name));
                format!("v2 {}", thumbnail_body(&name))
            }),
        )
        .route(
            "/gone/:name",
            get(move |Path(name): Path<String>| async move {
                gone.push(format!("/gone/{}", name));
                StatusCode::NOT_FOUND
            }),
        )
}

/// Listing page at `/listing/:slug` and the `get-gallery` endpoint.
/// `metadata` is served for any gallery id; `None` makes the endpoint fail.
pub fn gallery_routes(hits: &Hits, page: String, metadata: Option<String>) -> Router {
    let listing = hits.clone();
    let api = hits.clone();
    Router::new()
        .route(
            "/listing/:slug",
            get(move |Path(slug): Path<String>| async move {
                listing.push(format!("/listing/{}", slug));
                axum::response::Html(page)
            }),
        )
        .route(
            "/sample-galleries/data/get-gallery",
            get(
                move |Query(params): Query<HashMap<String, String>>| async move {
                    let id = params.get("galleryId").cloned().unwrap_or_default();
                    api.push(format!("/sample-galleries/data/get-gallery?galleryId={}", id));
                    match metadata {
                        Some(body) => (StatusCode::OK, body),
                        None => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
                    }
                },
            ),
        )
}

/// Read a written snapshot back
pub fn load_snapshot<T: DeserializeOwned>(path: &FsPath) -> T {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}
