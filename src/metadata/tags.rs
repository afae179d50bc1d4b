use scraper::{ElementRef, Html, Selector};

use super::TagMap;
use crate::error::{AppError, AppResult};

/// Which `<meta>` elements are worth collecting.
///
/// A meta element is kept when its `name` or `property` is one of `names`,
/// or starts with one of `prefixes` followed by `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    prefixes: Vec<String>,
    names: Vec<String>,
}

impl TagVocabulary {
    pub fn new<P, N>(prefixes: P, names: N) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        TagVocabulary {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        if self.names.iter().any(|n| n == key) {
            return true;
        }
        key.split_once(':')
            .is_some_and(|(prefix, _)| self.prefixes.iter().any(|p| p == prefix))
    }
}

impl Default for TagVocabulary {
    // Any Facebook app can register its own prefix; airbedandbreakfast is the
    // one we know sites actually ship.
    fn default() -> Self {
        TagVocabulary::new(
            ["og", "twitter", "al", "article", "airbedandbreakfast"],
            ["description", "cre"],
        )
    }
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::Parse(format!("bad selector {css:?}: {e}")))
}

/// Collect the page title, favicon and every interesting meta tag.
///
/// The first declaration of a key wins; later duplicates are dropped.
/// Entities are already decoded by the HTML parser.
pub fn extract_tags(html: &str, vocabulary: &TagVocabulary) -> AppResult<TagMap> {
    let document = Html::parse_document(html);
    let mut tags = TagMap::new();

    if let Some(title) = document.select(&selector("title")?).next() {
        let text = title.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            tags.insert("title".into(), text);
        }
    }

    let favicon = document
        .select(&selector("link[rel~=icon]")?)
        .find_map(|el| el.value().attr("href"));
    if let Some(href) = favicon {
        tags.insert("favicon".into(), href.to_string());
    }

    for meta in document.select(&selector("meta")?) {
        let Some(key) = meta_key(&meta, vocabulary) else {
            continue;
        };
        let content = meta.value().attr("content").unwrap_or_default();
        tags.entry(key.to_string())
            .or_insert_with(|| content.to_string());
    }

    Ok(tags)
}

fn meta_key<'a>(meta: &ElementRef<'a>, vocabulary: &TagVocabulary) -> Option<&'a str> {
    let el = meta.value();
    el.attr("name")
        .filter(|name| vocabulary.matches(name))
        .or_else(|| el.attr("property").filter(|p| vocabulary.matches(p)))
}
