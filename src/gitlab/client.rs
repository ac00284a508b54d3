// src/gitlab/client.rs
//! Blocking GitLab REST client for the three list endpoints.

use super::endpoint::{api_base, list_url};
use super::GroupDirectory;
use crate::config::RemoteConfig;
use crate::constants::{NEXT_PAGE_HEADER, PRIVATE_TOKEN_HEADER};
use crate::core_types::{Group, Project};
use crate::errors::{FetchError, FetchResult};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;

/// A `GroupDirectory` backed by the GitLab REST API.
///
/// Each listing requests pages of `per_page` entries and follows the
/// `X-Next-Page` header until GitLab reports no further page. Any 2xx status is
/// success; anything else, a transport failure, or an undecodable body is
/// returned as a `FetchError`.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    api_base: String,
    per_page: u32,
}

impl GitLabClient {
    /// Builds a client from the remote settings of a `Config`.
    ///
    /// # Errors
    /// Returns an error if the token cannot be sent as a header value or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(remote: &RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("groupmirror/", env!("CARGO_PKG_VERSION"))),
        );
        let mut token = HeaderValue::from_str(&remote.token)
            .context("Access token contains characters that are not valid in an HTTP header")?;
        token.set_sensitive(true);
        headers.insert(PRIVATE_TOKEN_HEADER, token);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = remote.timeout {
            builder = builder.timeout(timeout);
            log::debug!("HTTP timeout set to {:?}", timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base: api_base(remote.base_url.as_str(), &remote.api_version),
            per_page: remote.per_page,
        })
    }

    /// The endpoint prefix every request is built on.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetches every page of a list endpoint.
    #[tracing::instrument(level = "debug", skip(self))]
    fn fetch_all<T: DeserializeOwned>(&self, path: &str) -> FetchResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = list_url(&self.api_base, path, self.per_page, page)?;
            let url_str = url.to_string();
            log::debug!("GET {}", url_str);

            let response = self
                .http
                .get(url)
                .send()
                .map_err(|source| FetchError::Transport {
                    url: url_str.clone(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url_str,
                    status: status.as_u16(),
                });
            }

            let next_page = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());

            let body = response.text().map_err(|source| FetchError::Transport {
                url: url_str.clone(),
                source,
            })?;
            let mut batch: Vec<T> =
                serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                    url: url_str.clone(),
                    source,
                })?;
            log::debug!("Page {} of '{}' returned {} entries", page, path, batch.len());
            items.append(&mut batch);

            match next_page {
                // Only move forward so a misbehaving server cannot loop us.
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(items)
    }
}

impl GroupDirectory for GitLabClient {
    fn list_groups(&self) -> FetchResult<Vec<Group>> {
        self.fetch_all("groups")
    }

    fn list_sub_groups(&self, group_id: u64) -> FetchResult<Vec<Group>> {
        self.fetch_all(&format!("groups/{}/subgroups", group_id))
    }

    fn list_projects(&self, group_id: u64) -> FetchResult<Vec<Project>> {
        self.fetch_all(&format!("groups/{}/projects", group_id))
    }
}
