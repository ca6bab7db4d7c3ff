// Copyright 2025 Felipe Torres González
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Module with the handler for the health endpoint of CampusBot.
//!
//! # Description
//!
//! `GET /healthz` checks that the directory DB answers within [PING_TIMEOUT]:
//!
//! ```bash
//! curl 'http://localhost:8080/healthz'
//! {"ok":true,"db":"up"}
//! ```
//!
//! A DB that fails or times out gets a `503 Service Unavailable` with the reason in the `error` field.

use crate::directory::DirectoryStore;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tracing::{error, trace};

pub const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Router that serves the health endpoint.
pub fn health_router<D: DirectoryStore + 'static>(directory: Arc<D>) -> Router {
    Router::new()
        .route("/healthz", get(healthz::<D>))
        .with_state(directory)
}

pub async fn healthz<D: DirectoryStore>(State(directory): State<Arc<D>>) -> (StatusCode, Json<Value>) {
    let outcome = match tokio::time::timeout(PING_TIMEOUT, directory.ping()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(String::from("timed out while pinging the DB")),
    };

    match outcome {
        Ok(()) => {
            trace!("Health check passed");
            (StatusCode::OK, Json(json!({"ok": true, "db": "up"})))
        }
        Err(e) => {
            error!("Health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"ok": false, "error": e})),
            )
        }
    }
}
