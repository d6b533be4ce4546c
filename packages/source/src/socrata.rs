//! Socrata SODA API page fetcher.
//!
//! Issues a single request against a Socrata dataset using the `$offset` and
//! `$limit` query parameters and decodes the bare JSON array response.

use crime_export_incident_models::Incident;

use crate::{SourceError, records_from_json};

/// One page of a Socrata-style paginated endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    /// Base API URL (e.g., `"https://data.cityofgainesville.org/resource/gvua-xt9q.json"`).
    pub api_url: String,
    /// Index of the first record to request (`$offset`).
    pub offset: u64,
    /// Number of records to request (`$limit`).
    pub page_size: u64,
}

impl RemoteEndpoint {
    /// Creates an endpoint descriptor for one page.
    #[must_use]
    pub fn new(api_url: &str, offset: u64, page_size: u64) -> Self {
        Self {
            api_url: api_url.to_owned(),
            offset,
            page_size,
        }
    }

    /// Builds the full request URL, appending `$offset` and `$limit` to any
    /// query string already present on the base URL.
    #[must_use]
    pub fn page_url(&self) -> String {
        let separator = if self.api_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}$offset={}&$limit={}",
            self.api_url, self.offset, self.page_size
        )
    }
}

/// Fetches one page of records.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the server answers with a
/// non-success status, or the body is not a JSON array.
pub async fn fetch_page(
    client: &reqwest::Client,
    endpoint: &RemoteEndpoint,
) -> Result<Vec<Incident>, SourceError> {
    let url = endpoint.page_url();
    log::info!(
        "Fetching {}: offset={}, limit={}",
        endpoint.api_url,
        endpoint.offset,
        endpoint.page_size
    );
    log::debug!("GET {url}");

    let response = client.get(&url).send().await?.error_for_status()?;
    let payload: serde_json::Value = response.json().await?;
    let records = records_from_json(payload)?;

    log::debug!("Downloaded {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serves exactly one canned HTTP response and hands back the raw
    /// request head it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0_u8; 8192];
            let n = stream.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });

        (format!("http://{addr}/resource/gvua-xt9q.json"), handle)
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn page_url_appends_socrata_params() {
        let endpoint = RemoteEndpoint::new("https://example.org/resource/abcd.json", 5, 25);
        assert_eq!(
            endpoint.page_url(),
            "https://example.org/resource/abcd.json?$offset=5&$limit=25"
        );
    }

    #[test]
    fn page_url_extends_existing_query() {
        let endpoint = RemoteEndpoint::new("https://example.org/r.json?$order=report_date", 0, 10);
        assert_eq!(
            endpoint.page_url(),
            "https://example.org/r.json?$order=report_date&$offset=0&$limit=10"
        );
    }

    #[tokio::test]
    async fn fetches_and_decodes_page() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"narrative":"Test incident","report_date":"2023-02-09","offense_date":"2023-02-08","latitude":29.6516,"longitude":-82.3248}]"#,
        )
        .await;

        let records = fetch_page(&client(), &RemoteEndpoint::new(&url, 0, 10))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].narrative(), "Test incident");
        assert_eq!(records[0].report_date(), "2023-02-09");
        assert_eq!(records[0].longitude(), "-82.3248");

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /resource/gvua-xt9q.json?"));
        assert!(request_line.contains("$offset=0"));
        assert!(request_line.contains("$limit=10"));
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let (url, server) = serve_once("500 Internal Server Error", "[]").await;

        let err = fetch_page(&client(), &RemoteEndpoint::new(&url, 0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_array_body_is_an_error() {
        let (url, server) = serve_once("200 OK", r#"{"error":"dataset not found"}"#).await;

        let err = fetch_page(&client(), &RemoteEndpoint::new(&url, 0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let (url, server) = serve_once("200 OK", "[{\"narrative\":").await;

        let err = fetch_page(&client(), &RemoteEndpoint::new(&url, 0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
        server.await.unwrap();
    }
}
