use super::TagMap;

/// Canonical key → equivalent keys from competing vocabularies, in order of
/// preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, Vec<String>)>,
}

impl AliasTable {
    pub fn new<I, K, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        AliasTable {
            entries: entries
                .into_iter()
                .map(|(canonical, aliases)| {
                    (
                        canonical.into(),
                        aliases.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Copy the first available alias under every canonical key that is
    /// missing from `tags`.
    ///
    /// Existing canonical values are never overwritten. Resolution is a
    /// single pass over the tags as they were on entry, so a value copied
    /// under one canonical key is never picked up as an alias of another.
    pub fn resolve(&self, tags: &mut TagMap) {
        let found: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|(canonical, _)| !tags.contains_key(canonical))
            .filter_map(|(canonical, aliases)| {
                aliases
                    .iter()
                    .find_map(|alias| tags.get(alias))
                    .map(|value| (canonical.clone(), value.clone()))
            })
            .collect();

        tags.extend(found);
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable::new([
            ("og:description", vec!["twitter:description", "description"]),
            ("og:title", vec!["twitter:title", "title"]),
            ("og:image", vec!["twitter:image"]),
            ("og:site_name", vec!["cre"]),
            ("article:published_time", vec!["article:published"]),
            ("al:iphone:url", vec!["twitter:app:url:iphone"]),
            ("al:iphone:app_store_id", vec!["twitter:app:id:iphone"]),
            ("al:iphone:app_name", vec!["twitter:app:name:iphone"]),
            ("al:ipad:url", vec!["twitter:app:url:ipad"]),
            ("al:ipad:app_store_id", vec!["twitter:app:id:ipad"]),
            ("al:ipad:app_name", vec!["twitter:app:name:ipad"]),
            ("al:android:url", vec!["twitter:app:url:googleplay"]),
            ("al:android:package", vec!["twitter:app:id:googleplay"]),
            ("al:android:app_name", vec!["twitter:app:name:googleplay"]),
        ])
    }
}
