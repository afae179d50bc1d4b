//! Content-type detection. Declared headers are only trusted for (X)HTML.

/// How many leading body bytes are inspected.
pub const SNIFF_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyKind {
    Markup,
    Image(String),
    Video(String),
    Other(String),
}

/// Whether the declared `Content-Type` sends the body straight to tag
/// extraction: absent, blank, HTML or XHTML.
///
/// XHTML has to be trusted here since its `<?xml` prolog sniffs as
/// `text/xml`.
pub fn declares_markup(declared: &str) -> bool {
    let declared = declared.trim();
    declared.is_empty()
        || declared.contains("text/html")
        || essence(declared).eq_ignore_ascii_case("application/xhtml+xml")
}

/// The type the body really has, judged from its first bytes.
///
/// Falls back to the declared type (without parameters) when the bytes
/// match no known signature.
pub fn effective_type(declared: &str, prefix: &[u8]) -> String {
    let prefix = &prefix[..prefix.len().min(SNIFF_LEN)];
    match infer::get(prefix) {
        Some(kind) => kind.mime_type().to_string(),
        None => essence(declared).to_string(),
    }
}

pub fn classify(content_type: &str) -> BodyKind {
    if content_type.contains("text/html") || content_type.contains("application/xhtml+xml") {
        BodyKind::Markup
    } else if content_type.starts_with("image") {
        BodyKind::Image(content_type.to_string())
    } else if content_type.starts_with("video") {
        BodyKind::Video(content_type.to_string())
    } else {
        BodyKind::Other(content_type.to_string())
    }
}

fn essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
}
