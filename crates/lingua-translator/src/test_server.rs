use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// First request the canned server saw
#[derive(Debug)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Answer every request with `status` and a JSON `body`
pub async fn serve_canned(
    status: u16,
    body: &'static str,
) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = StatusCode::from_u16(status).unwrap();

    let (tx, rx) = oneshot::channel();
    let tx = Arc::new(Mutex::new(Some(tx)));

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, request_body: Bytes| {
            let tx = tx.clone();
            async move {
                if let Some(tx) = tx.lock().unwrap().take() {
                    let _ = tx.send(Captured {
                        method,
                        path: uri.path().to_string(),
                        headers,
                        body: String::from_utf8_lossy(&request_body).to_string(),
                    });
                }
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        },
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}/"), rx)
}
