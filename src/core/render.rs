use crate::config::toml_config::PageConfig;
use crate::domain::model::RenderedPost;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const BODY_CLASS: &str = "flex flex-col justify-center items-center";

fn post_item(post: &RenderedPost) -> Markup {
    html! {
        li data-content-id=(post.content_id) {
            h5 { (post.title) }
            div class=(BODY_CLASS) {
                (PreEscaped(&post.body_html))
            }
        }
    }
}

/// Renders the full blog page. Titles are escaped, bodies are trusted CMS HTML.
pub fn render_page(page: &PageConfig, posts: &[RenderedPost]) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title) }
            }
            body {
                main {
                    h1 { (page.heading) }
                    ul {
                        @for post in posts {
                            (post_item(post))
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}
