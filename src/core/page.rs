use crate::config::toml_config::PageConfig;
use crate::core::markup::MarkupTransform;
use crate::core::render::render_page;
use crate::domain::model::{Post, RenderedPost};
use crate::domain::ports::ContentSource;
use crate::utils::error::Result;

/// One page view: fetch, validate, transform, render.
pub struct BlogPage<S: ContentSource> {
    source: S,
    markup: MarkupTransform,
    page: PageConfig,
}

impl<S: ContentSource> BlogPage<S> {
    pub fn new(source: S, markup: MarkupTransform, page: PageConfig) -> Self {
        Self {
            source,
            markup,
            page,
        }
    }

    pub async fn render(&self) -> Result<String> {
        tracing::debug!("Fetching posts...");
        let posts = self.source.fetch_posts().await?;
        tracing::info!("Fetched {} posts", posts.len());

        let rendered = self.transform(posts)?;
        let html = render_page(&self.page, &rendered);
        tracing::debug!("Rendered page ({} bytes)", html.len());

        Ok(html)
    }

    pub fn transform(&self, posts: Vec<Post>) -> Result<Vec<RenderedPost>> {
        posts
            .into_iter()
            .map(|post| {
                let body_html = self.markup.apply(&post.fields.content)?;
                Ok(RenderedPost {
                    content_id: post.content_id,
                    title: post.fields.title,
                    body_html,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agility::parse_content_list;
    use crate::utils::error::BlogError;
    use async_trait::async_trait;

    /// Serves a canned API body through the real validator.
    struct CannedSource {
        body: String,
    }

    impl CannedSource {
        fn new(value: serde_json::Value) -> Self {
            Self {
                body: value.to_string(),
            }
        }
    }

    #[async_trait]
    impl ContentSource for CannedSource {
        async fn fetch_posts(&self) -> Result<Vec<Post>> {
            parse_content_list(&self.body)
        }
    }

    fn page(source: CannedSource) -> BlogPage<CannedSource> {
        BlogPage::new(source, MarkupTransform::default(), PageConfig::default())
    }

    #[tokio::test]
    async fn test_valid_envelope_renders_one_item() {
        let source = CannedSource::new(serde_json::json!({
            "items": [{
                "contentID": 1,
                "fields": {"title": "A", "slug": "a", "date": "2024-01-01", "content": "<p>x</p>"}
            }]
        }));

        let html = page(source).render().await.unwrap();

        assert_eq!(html.matches("<li ").count(), 1);
        assert!(html.contains("<h5>A</h5>"));
        assert!(html.contains(r#"<p class="text-red-400 mb-4 text-center">x</p>"#));
    }

    #[tokio::test]
    async fn test_missing_field_fails_without_output() {
        let source = CannedSource::new(serde_json::json!({
            "items": [{
                "contentID": 1,
                "fields": {"title": "A", "slug": "a", "content": "<p>x</p>"}
            }]
        }));

        let result = page(source).render().await;

        assert!(matches!(result, Err(BlogError::InvalidData)));
    }

    #[tokio::test]
    async fn test_empty_items_renders_heading_only() {
        let source = CannedSource::new(serde_json::json!({ "items": [] }));

        let html = page(source).render().await.unwrap();

        assert!(html.contains("<h1>Agility CMS Blog</h1>"));
        assert!(html.contains("<ul></ul>"));
    }

    #[tokio::test]
    async fn test_non_array_items_renders_empty_list() {
        let source = CannedSource::new(serde_json::json!({ "items": {"unexpected": true} }));

        let html = page(source).render().await.unwrap();

        assert!(html.contains("<ul></ul>"));
    }

    #[test]
    fn test_transform_keeps_order_and_ids() {
        let posts = parse_content_list(
            &serde_json::json!({
                "items": [
                    {"contentID": 3, "fields": {"title": "T3", "slug": "t3", "date": "d", "content": "<h2>h</h2>"}},
                    {"contentID": 4, "fields": {"title": "T4", "slug": "t4", "date": "d", "content": "plain"}}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let blog = page(CannedSource::new(serde_json::json!({ "items": [] })));
        let rendered = blog.transform(posts).unwrap();

        assert_eq!(rendered[0].content_id, 3);
        assert_eq!(rendered[0].body_html, r#"<h2 class="text-2xl font-bold">h</h2>"#);
        assert_eq!(rendered[1].title, "T4");
        assert_eq!(rendered[1].body_html, "plain");
    }
}
