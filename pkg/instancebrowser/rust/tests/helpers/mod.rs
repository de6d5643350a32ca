// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use instance_browser::HttpInstanceApi;
use reqwest::Url;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Fixture {
    status: StatusCode,
    body: String,
}

/// Canned responses keyed by request path, served on 127.0.0.1.
/// Unknown paths get the backend's 404 error body.
#[derive(Default)]
pub struct FixtureServer {
    routes: HashMap<String, Fixture>,
}

pub struct RunningServer {
    pub base_url: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Fixture {
                status: StatusCode::from_u16(status).expect("valid status code"),
                body: body.to_string(),
            },
        );
        self
    }

    pub async fn start(self) -> RunningServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fixture server");
        let addr = listener.local_addr().expect("no local address");
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = Arc::clone(&routes);
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                        let path = req.uri().path().to_string();
                        seen.lock().expect("poisoned").push(path.clone());
                        let fixture = routes.get(&path).cloned().unwrap_or(Fixture {
                            status: StatusCode::NOT_FOUND,
                            body: r#"{"error":"Failed to fetch metric data"}"#.to_string(),
                        });
                        async move {
                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(fixture.status)
                                    .header("Content-Type", "application/json")
                                    .body(Full::new(Bytes::from(fixture.body)))
                                    .expect("valid response"),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        RunningServer {
            base_url: Url::parse(&format!("http://{addr}")).expect("valid URL"),
            requests,
        }
    }
}

impl RunningServer {
    pub fn api(&self) -> HttpInstanceApi {
        HttpInstanceApi::new(self.base_url.clone(), None).expect("failed to build client")
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("poisoned").clone()
    }
}
