//! News search client and article layout

use serde::Deserialize;
use serde_json::Value;

use crate::config::{
    Endpoints, NEWS_COUNT, NEWS_KEY_HEADER, NEWS_MARKET, NEWS_OFFSET, NEWS_QUERY,
    NEWS_SAFE_SEARCH,
};
use crate::credentials::Credentials;
use crate::html;
use crate::transport::{ApiError, HttpRequest, Transport};

#[derive(Clone, Debug, PartialEq)]
pub struct NewsArticle {
    pub headline: String,
    pub url: String,
    pub description: String,
    pub thumbnail: Option<String>,
}

/// How an article card is laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArticleLayout<'a> {
    /// Thumbnail in the left cell, header and description in the right.
    Split { thumbnail: &'a str },
    /// Header and description spanning the full width.
    FullWidth,
}

impl NewsArticle {
    pub fn layout(&self) -> ArticleLayout<'_> {
        match self.thumbnail.as_deref() {
            Some(thumbnail) => ArticleLayout::Split { thumbnail },
            None => ArticleLayout::FullWidth,
        }
    }

    /// Card markup: a one-row table with an optional image cell.
    pub fn to_html(&self) -> String {
        let content = format!(
            "<div class='newsheader'><a href='{}'><b>{}</b></a></div><div class='newsdescription'>{}</div>",
            html::escape(&self.url),
            html::escape(&self.headline),
            html::escape(&self.description),
        );

        let cells = match self.layout() {
            ArticleLayout::Split { thumbnail } => format!(
                "<td><img src='{}' /></td><td>{}</td>",
                html::escape(thumbnail),
                content
            ),
            ArticleLayout::FullWidth => format!("<td colspan=2>{content}</td>"),
        };
        format!("<table class='newstable'><tr>{cells}</tr></table>")
    }
}

/// Markup for the whole list, one `<li>` per article.
pub fn list_html(articles: &[NewsArticle]) -> String {
    articles
        .iter()
        .map(|a| format!("<li>{}</li>", a.to_html()))
        .collect()
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    value: Option<Vec<WireArticle>>,
}

#[derive(Debug, Deserialize)]
struct WireArticle {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
    image: Option<WireImage>,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    thumbnail: Option<WireThumbnail>,
}

#[derive(Debug, Deserialize)]
struct WireThumbnail {
    #[serde(rename = "contentUrl")]
    content_url: String,
}

/// Extract articles from a search payload.
///
/// A payload without a `value` list (an error envelope, say) yields `None` so
/// the current list stays on screen.
pub fn parse_news(payload: Value) -> Result<Option<Vec<NewsArticle>>, ApiError> {
    let response: SearchResponse =
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;

    let Some(value) = response.value else {
        tracing::debug!("news payload has no value list");
        return Ok(None);
    };

    let articles = value
        .into_iter()
        .map(|a| NewsArticle {
            headline: a.name,
            url: a.url,
            description: a.description,
            thumbnail: a
                .image
                .and_then(|i| i.thumbnail)
                .map(|t| t.content_url),
        })
        .collect();
    Ok(Some(articles))
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct NewsClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> NewsClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Build the search request. The key travels in a header, never the URL.
    pub fn request(&self, credentials: &Credentials) -> Option<HttpRequest> {
        if !credentials.has_news() {
            return None;
        }
        Some(
            HttpRequest::get(self.endpoints.news_search())
                .query("q", NEWS_QUERY)
                .query("count", NEWS_COUNT.to_string())
                .query("offset", NEWS_OFFSET.to_string())
                .query("mkt", NEWS_MARKET)
                .query("safeSearch", NEWS_SAFE_SEARCH)
                .header(NEWS_KEY_HEADER, credentials.news_key.clone()),
        )
    }

    pub async fn search(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Vec<NewsArticle>>, ApiError> {
        let Some(request) = self.request(credentials) else {
            tracing::debug!("news key missing, skipping news refresh");
            return Ok(None);
        };
        let payload = self.transport.get_json(request).await?;
        parse_news(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    fn article(thumbnail: Option<&str>) -> NewsArticle {
        NewsArticle {
            headline: "Lake freezes".into(),
            url: "https://news.example/lake".into(),
            description: "Ice is back.".into(),
            thumbnail: thumbnail.map(String::from),
        }
    }

    #[test]
    fn test_layout_without_thumbnail_is_full_width() {
        let a = article(None);
        assert_eq!(a.layout(), ArticleLayout::FullWidth);
        let html = a.to_html();
        assert!(html.contains("<td colspan=2>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_layout_with_thumbnail_puts_image_left() {
        let a = article(Some("https://img.example/t.jpg"));
        assert_eq!(
            a.layout(),
            ArticleLayout::Split {
                thumbnail: "https://img.example/t.jpg"
            }
        );
        let html = a.to_html();
        let img = html.find("<img").unwrap();
        let header = html.find("newsheader").unwrap();
        assert!(img < header, "image cell should come first: {html}");
        assert!(!html.contains("colspan"));
    }

    #[test]
    fn test_list_html_wraps_items() {
        let html = list_html(&[article(None), article(None)]);
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(list_html(&[]).is_empty());
    }

    #[test]
    fn test_parse_news() {
        let articles = parse_news(json!({
            "value": [
                {
                    "name": "A",
                    "url": "https://a",
                    "description": "first",
                    "image": { "thumbnail": { "contentUrl": "https://a/t.jpg" } }
                },
                { "name": "B", "url": "https://b", "description": "second", "image": {} }
            ]
        }))
        .unwrap()
        .expect("value list present");
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].thumbnail.as_deref(), Some("https://a/t.jpg"));
        assert_eq!(articles[1].thumbnail, None);
    }

    #[test]
    fn test_parse_news_rejects_wrong_shape() {
        assert!(matches!(
            parse_news(json!({ "value": 3 })),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_news_without_value_is_none() {
        assert_eq!(parse_news(json!({ "_type": "ErrorResponse" })).unwrap(), None);
        assert_eq!(parse_news(json!({ "value": [] })).unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_error_envelope_is_not_an_empty_list() {
        let transport = RecordingTransport::replying(json!({ "_type": "ErrorResponse" }));
        let client = NewsClient::new(transport, Endpoints::default());
        let creds = Credentials {
            news_key: "nkey".into(),
            ..Default::default()
        };

        assert_eq!(client.search(&creds).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_key_goes_in_header() {
        let transport = RecordingTransport::replying(json!({ "value": [] }));
        let client = NewsClient::new(transport.clone(), Endpoints::default());
        let creds = Credentials {
            news_key: "nkey".into(),
            ..Default::default()
        };

        let articles = client.search(&creds).await.unwrap().unwrap();
        assert!(articles.is_empty());

        let req = &transport.requests()[0];
        assert_eq!(req.header_value(NEWS_KEY_HEADER), Some("nkey"));
        assert!(!req.full_url().contains("nkey"));
        assert_eq!(req.query_value("q"), Some("local news"));
        assert_eq!(req.query_value("count"), Some("10"));
        assert_eq!(req.query_value("offset"), Some("0"));
        assert_eq!(req.query_value("mkt"), Some("en-us"));
        assert_eq!(req.query_value("safeSearch"), Some("Moderate"));
    }

    #[tokio::test]
    async fn test_empty_key_sends_nothing() {
        let transport = RecordingTransport::replying(json!({ "value": [] }));
        let client = NewsClient::new(transport.clone(), Endpoints::default());

        assert!(client.search(&Credentials::default()).await.unwrap().is_none());
        assert_eq!(transport.request_count(), 0);
    }
}
