mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;

/// Fetches a URL through the given client stack and returns the body bytes.
pub async fn fetch_bytes(client: &dyn HttpClient, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    Ok(resp.bytes().await?.to_vec())
}
