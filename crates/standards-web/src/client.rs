//! Async HTTP client wrapping the catalog JSON API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use standards_core::entity::CoinWithDuties;

use crate::error::{BuildError, Error};

/// Async HTTP client for the catalog JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  base:   Url,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self, BuildError> {
    let base = Url::parse(base_url).map_err(|_| BuildError::BaseUrl(base_url.to_owned()))?;
    if base.cannot_be_a_base() {
      return Err(BuildError::BaseUrl(base_url.to_owned()));
    }
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, base })
  }

  /// Append path segments to the base URL, percent-encoding each one.
  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    // `new` rejected cannot-be-a-base URLs, so this always succeeds.
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
    let url = self.url(segments);
    let resp = self.client.get(url.clone()).send().await?;

    let status = resp.status();
    if !status.is_success() {
      tracing::debug!(%url, %status, "api returned failure");
      return Err(Error::Upstream(status));
    }
    Ok(resp.json().await?)
  }

  /// `GET /coins`
  pub async fn list_coins(&self) -> Result<Vec<CoinWithDuties>, Error> {
    self.get_json(&["coins"]).await
  }

  /// `GET /coins/{id}`
  pub async fn get_coin(&self, id: &str) -> Result<CoinWithDuties, Error> {
    self.get_json(&["coins", id]).await
  }
}
