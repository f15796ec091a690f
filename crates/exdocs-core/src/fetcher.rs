//! Documentation page fetching for generation context.
//!
//! Pages are downloaded over HTTP(S) and reduced to visible text with
//! [`strip_markup`]. [`Fetcher::fetch_context`] never fails; an unreachable
//! page contributes empty context and a warning.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::{Error, Result};

/// `<script>` and `<style>` elements including their bodies.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static HIDDEN_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});

/// HTML comments.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Any remaining tag.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// HTTP client that turns documentation pages into plain-text context.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with a 30 second request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("exdocs/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns its visible text.
    ///
    /// Only `http` and `https` URLs are accepted. Non-success statuses are
    /// reported as [`Error::HttpStatus`].
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        debug!("fetching {}", url);
        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let text = strip_markup(&body);
        info!("Fetched {} bytes of text from {}", text.len(), url);
        Ok(text)
    }

    /// Fetches `url` for use as generation context.
    ///
    /// Any failure is logged and yields an empty string so the run continues.
    pub async fn fetch_context(&self, url: &str) -> String {
        match self.fetch_text(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not fetch content from {url}: {e}");
                String::new()
            },
        }
    }
}

/// Reduce an HTML document to its visible text.
///
/// Script and style bodies, comments and tags are removed, entities are
/// decoded, and runs of blank lines collapse to one.
///
/// ```rust
/// use exdocs_core::fetcher::strip_markup;
///
/// let html = "<html><style>p{}</style><p>Hello &amp; welcome</p></html>";
/// assert_eq!(strip_markup(html), "Hello & welcome");
/// ```
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let text = HIDDEN_BLOCK_RE.replace_all(html, "");
    let text = COMMENT_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, "");
    let decoded = html_escape::decode_html_entities(&text);

    let mut out = String::with_capacity(decoded.len());
    let mut blank_run = true;
    for line in decoded.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !blank_run {
                out.push('\n');
            }
            blank_run = true;
            continue;
        }
        out.push_str(line);
        out.push('\n');
        blank_run = false;
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_strip_markup_drops_hidden_blocks() {
        let html = r#"<html><head><SCRIPT type="text/javascript">var x = "<p>";</SCRIPT>
<style>
body { color: red; }
</style></head>
<body><!-- nav --><h1>Quickstart</h1>

<p>Install the &lt;SDK&gt;.</p></body></html>"#;
        let text = strip_markup(html);
        assert!(!text.contains("var x"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("nav"));
        assert!(text.contains("Quickstart"));
        assert!(text.contains("Install the <SDK>."));
    }

    #[test]
    fn test_strip_markup_collapses_blank_lines() {
        let text = strip_markup("<p>one</p>\n\n\n\n<p>two</p>\n");
        assert_eq!(text, "one\n\ntwo");
    }

    #[tokio::test]
    async fn test_fetch_text_strips_page() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><script>x()</script><p>Streaming text</p></html>"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new()?;
        let text = fetcher
            .fetch_text(&format!("{}/docs", mock_server.uri()))
            .await?;
        assert_eq!(text, "Streaming text");
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new()?;
        let err = fetcher
            .fetch_text(&format!("{}/missing", mock_server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert!(err.is_recoverable());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_context_degrades_to_empty() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new()?;
        let context = fetcher
            .fetch_context(&format!("{}/broken", mock_server.uri()))
            .await;
        assert!(context.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() -> anyhow::Result<()> {
        let fetcher = Fetcher::new()?;
        let err = fetcher.fetch_text("file:///etc/passwd").await.unwrap_err();
        assert_eq!(err.category(), "invalid_url");
        assert!(fetcher.fetch_context("not a url").await.is_empty());
        Ok(())
    }
}
