// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! HTTP client for the instances API.
//!
//! `GET /instances` lists instances, `GET /instances/{id}` returns one
//! instance with its graph data.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use reqwest::{Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::errors::FetchError;
use crate::model::{InstanceDetail, InstanceSummary};

/// Read side of the instances API.
#[async_trait]
pub trait InstanceApi: Send + Sync {
    /// Fetch every instance, in server order.
    async fn list_instances(&self) -> Result<Vec<InstanceSummary>, FetchError>;

    /// Fetch one instance and its graph data.
    async fn get_instance(&self, id: &str) -> Result<InstanceDetail, FetchError>;
}

#[derive(Clone)]
pub struct HttpInstanceApi {
    base_url: Url,
    client: reqwest::Client,
}

/// Error body written by the backend alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpInstanceApi {
    /// Build a client rooted at `base_url`. Without `timeout`, requests wait
    /// for as long as the server takes.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            bail!("API URL cannot be used as a base: {base_url}");
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let response = check_status(&url, response).await?;

        response.json().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

async fn check_status(url: &Url, response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // The message is best effort: a body that is missing or not the
    // backend's error shape still reports the status.
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error);

    Err(FetchError::Status {
        url: url.to_string(),
        status,
        message,
    })
}

#[async_trait]
impl InstanceApi for HttpInstanceApi {
    async fn list_instances(&self) -> Result<Vec<InstanceSummary>, FetchError> {
        self.get_json(self.endpoint(&["instances"])).await
    }

    async fn get_instance(&self, id: &str) -> Result<InstanceDetail, FetchError> {
        self.get_json(self.endpoint(&["instances", id])).await
    }
}
