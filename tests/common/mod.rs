//! In-process json-server stand-in for the `/todos` collection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::sync::{Mutex, oneshot};

#[derive(Default)]
struct Store {
    items: Vec<Value>,
    next_id: u64,
    calls: Vec<String>,
    fail_next: Option<u16>,
}

type Shared = Arc<Mutex<Store>>;

pub struct StoreGuard {
    pub base_url: String,
    store: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}

#[allow(dead_code)]
impl StoreGuard {
    /// Requests seen so far, e.g. `["GET /todos", "POST /todos"]`.
    pub fn calls(&self) -> Vec<String> {
        self.store.blocking_lock().calls.clone()
    }

    pub fn items(&self) -> Vec<Value> {
        self.store.blocking_lock().items.clone()
    }

    /// The next request answers with `status` and an empty object.
    pub fn fail_next(&self, status: u16) {
        self.store.blocking_lock().fail_next = Some(status);
    }

    pub fn seed(&self, title: &str, completed: bool) -> u64 {
        let mut store = self.store.blocking_lock();
        store.next_id += 1;
        let id = store.next_id;
        store
            .items
            .push(json!({ "id": id, "title": title, "completed": completed }));
        id
    }
}

pub fn spawn_store() -> Result<StoreGuard> {
    let store: Shared = Arc::new(Mutex::new(Store::default()));
    let (addr_tx, addr_rx) = std::sync::mpsc::channel::<std::io::Result<SocketAddr>>();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = router(store.clone());
    let thread = thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                let _ = addr_tx.send(Err(e));
                return;
            }
        };
        rt.block_on(async move {
            let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                Ok(l) => l,
                Err(e) => {
                    let _ = addr_tx.send(Err(e));
                    return;
                }
            };
            let _ = addr_tx.send(listener.local_addr());
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
    });

    let addr = addr_rx
        .recv()
        .context("store thread exited before binding")?
        .context("bind fake store")?;

    Ok(StoreGuard {
        base_url: format!("http://{}", addr),
        store,
        shutdown: Some(shutdown_tx),
        thread: Some(thread),
    })
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).put(replace_todo).delete(delete_todo),
        )
        .route("/garbage", get(garbage))
        .with_state(store)
}

fn begin(store: &mut Store, call: String) -> Option<Response> {
    store.calls.push(call);
    let status = store.fail_next.take()?;
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Some((status, Json(json!({}))).into_response())
}

fn position(store: &Store, id: &str) -> Option<usize> {
    store.items.iter().position(|v| match &v["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

async fn list_todos(State(store): State<Shared>) -> Response {
    let mut store = store.lock().await;
    if let Some(resp) = begin(&mut store, "GET /todos".to_string()) {
        return resp;
    }
    Json(Value::Array(store.items.clone())).into_response()
}

async fn create_todo(State(store): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut store = store.lock().await;
    if let Some(resp) = begin(&mut store, "POST /todos".to_string()) {
        return resp;
    }
    store.next_id += 1;
    body["id"] = json!(store.next_id);
    store.items.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn get_todo(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().await;
    if let Some(resp) = begin(&mut store, format!("GET /todos/{}", id)) {
        return resp;
    }
    match position(&store, &id) {
        Some(i) => Json(store.items[i].clone()).into_response(),
        None => not_found(),
    }
}

async fn replace_todo(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut store = store.lock().await;
    if let Some(resp) = begin(&mut store, format!("PUT /todos/{}", id)) {
        return resp;
    }
    let Some(i) = position(&store, &id) else {
        return not_found();
    };
    body["id"] = store.items[i]["id"].clone();
    store.items[i] = body.clone();
    Json(body).into_response()
}

async fn delete_todo(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().await;
    if let Some(resp) = begin(&mut store, format!("DELETE /todos/{}", id)) {
        return resp;
    }
    let Some(i) = position(&store, &id) else {
        return not_found();
    };
    store.items.remove(i);
    Json(json!({})).into_response()
}

async fn garbage() -> impl IntoResponse {
    (StatusCode::OK, "<html>not json</html>")
}
