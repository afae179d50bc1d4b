pub mod applink;
pub mod place;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metadata::decode::{assign, assign_opt, decode_in, fill, Decode, Field};

pub use applink::{Android, AppLink, Ios, Web, Windows};
pub use place::{ClockTime, GeoCoordinates, Hours, Place, PlaceCard, PostalAddress, Rating};

// ============================================================================
// Card Kinds
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CardType {
    Article,
    Image,
    Link,
    Place,
    ProductSearch,
    Product,
    Review,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// The structured description of one fetched resource.
///
/// Serializes with a `card_type` discriminator next to `web_url` and the
/// variant's payload object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "card_type", rename_all = "snake_case")]
pub enum Card {
    Link(LinkCard),
    Article(ArticleCard),
    Image(ImageCard),
    Video(VideoCard),
    Place(PlaceCard),
}

impl Card {
    pub fn card_type(&self) -> CardType {
        match self {
            Card::Link(_) => CardType::Link,
            Card::Article(_) => CardType::Article,
            Card::Image(_) => CardType::Image,
            Card::Video(_) => CardType::Video,
            Card::Place(_) => CardType::Place,
        }
    }

    pub fn web_url(&self) -> &str {
        match self {
            Card::Link(c) => &c.web_url,
            Card::Article(c) => &c.web_url,
            Card::Image(c) => &c.web_url,
            Card::Video(c) => &c.web_url,
            Card::Place(c) => &c.web_url,
        }
    }

    /// Metadata shared by every variant.
    pub fn metadata(&self) -> &GenericMetadata {
        match self {
            Card::Link(c) => &c.target.metadata,
            Card::Article(c) => &c.article.metadata,
            Card::Image(c) => &c.media.metadata,
            Card::Video(c) => &c.media.metadata,
            Card::Place(c) => &c.place.metadata,
        }
    }
}

// ============================================================================
// Shared Metadata
// ============================================================================

/// Metadata that pretty much every page has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Always allocated by decoding, even when the page declares no app links.
    #[serde(default)]
    pub app_link: Option<AppLink>,
    /// Usually the favicon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_icon: Option<String>,
    /// Always allocated by decoding, even when the page declares no image.
    #[serde(default)]
    pub image: Option<ImageDetails>,
}

impl Decode for GenericMetadata {
    const NAME: &'static str = "GenericMetadata";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("title", "og:title", |m: &mut Self, raw| {
            assign_opt(&mut m.title, raw)
        }),
        Field::key("publication_date", "article:published_time", |m: &mut Self, raw| {
            assign_opt(&mut m.publication_date, raw)
        }),
        Field::key("source", "og:site_name", |m: &mut Self, raw| {
            assign_opt(&mut m.source, raw)
        }),
        Field::fill("app_link", |m: &mut Self, scope| fill(&mut m.app_link, scope)),
        Field::key("source_icon", "favicon", |m: &mut Self, raw| {
            assign_opt(&mut m.source_icon, raw)
        }),
        Field::fill("image", |m: &mut Self, scope| fill(&mut m.image, scope)),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_content_type: Option<String>,
}

impl Decode for ImageDetails {
    const NAME: &'static str = "ImageDetails";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("image_url", "og:image", |d: &mut Self, raw| {
            assign(&mut d.image_url, raw)
        }),
        Field::key("width", "og:image:width", |d: &mut Self, raw| {
            assign_opt(&mut d.width, raw)
        }),
        Field::key("height", "og:image:height", |d: &mut Self, raw| {
            assign_opt(&mut d.height, raw)
        }),
    ];
}

// ============================================================================
// Link
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCard {
    pub web_url: String,
    pub target: LinkTarget,
}

impl LinkCard {
    pub fn new(web_url: &str, link_url: &str) -> Self {
        LinkCard {
            web_url: web_url.to_string(),
            target: LinkTarget {
                url: link_url.to_string(),
                ..LinkTarget::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub metadata: GenericMetadata,
}

impl Decode for LinkTarget {
    const NAME: &'static str = "LinkTarget";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("description", "og:description", |t: &mut Self, raw| {
            assign_opt(&mut t.description, raw)
        }),
        Field::squash("metadata", |t: &mut Self, scope| {
            decode_in(scope, &mut t.metadata)
        }),
    ];
}

// ============================================================================
// Article
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCard {
    pub web_url: String,
    pub article: Article,
}

impl ArticleCard {
    pub fn new(web_url: &str, article_url: &str) -> Self {
        ArticleCard {
            web_url: web_url.to_string(),
            article: Article {
                url: article_url.to_string(),
                ..Article::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    #[serde(default)]
    pub abstract_content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_breaking: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
    #[serde(flatten)]
    pub metadata: GenericMetadata,
}

impl Decode for Article {
    const NAME: &'static str = "Article";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("abstract_content", "og:description", |a: &mut Self, raw| {
            assign(&mut a.abstract_content, raw)
        }),
        Field::squash("metadata", |a: &mut Self, scope| {
            decode_in(scope, &mut a.metadata)
        }),
    ];
}

// ============================================================================
// Image
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCard {
    pub web_url: String,
    pub media: ImageMedia,
}

impl ImageCard {
    pub fn new(web_url: &str, src: &str) -> Self {
        ImageCard {
            web_url: web_url.to_string(),
            media: ImageMedia {
                image_details: ImageDetails {
                    image_url: src.to_string(),
                    ..ImageDetails::default()
                },
                ..ImageMedia::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMedia {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub image_details: ImageDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(flatten)]
    pub metadata: GenericMetadata,
}

impl Default for ImageMedia {
    fn default() -> Self {
        ImageMedia {
            media_type: MediaType::Image,
            image_details: ImageDetails::default(),
            image_caption: None,
            author: None,
            metadata: GenericMetadata::default(),
        }
    }
}

impl Decode for ImageMedia {
    const NAME: &'static str = "ImageMedia";
    const FIELDS: &'static [Field<Self>] = &[Field::squash("metadata", |m: &mut Self, scope| {
        decode_in(scope, &mut m.metadata)
    })];
}

// ============================================================================
// Video
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCard {
    pub web_url: String,
    pub media: VideoMedia,
}

impl VideoCard {
    pub fn new(web_url: &str) -> Self {
        VideoCard {
            web_url: web_url.to_string(),
            media: VideoMedia::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMedia {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub embedded_url: String,
    #[serde(default)]
    pub embedded_url_width: String,
    #[serde(default)]
    pub embedded_url_height: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(flatten)]
    pub metadata: GenericMetadata,
}

impl Default for VideoMedia {
    fn default() -> Self {
        VideoMedia {
            media_type: MediaType::Video,
            embedded_url: String::new(),
            embedded_url_width: String::new(),
            embedded_url_height: String::new(),
            stream_url: None,
            stream_content_type: None,
            poster_image_url: None,
            creator: None,
            metadata: GenericMetadata::default(),
        }
    }
}

impl Decode for VideoMedia {
    const NAME: &'static str = "VideoMedia";
    const FIELDS: &'static [Field<Self>] = &[
        Field::key("embedded_url_width", "og:video:width", |v: &mut Self, raw| {
            assign(&mut v.embedded_url_width, raw)
        }),
        Field::key("embedded_url_height", "og:video:height", |v: &mut Self, raw| {
            assign(&mut v.embedded_url_height, raw)
        }),
        Field::key("stream_url", "og:video:url", |v: &mut Self, raw| {
            assign_opt(&mut v.stream_url, raw)
        }),
        Field::key("stream_content_type", "og:video:type", |v: &mut Self, raw| {
            assign_opt(&mut v.stream_content_type, raw)
        }),
        Field::key("poster_image_url", "og:image:url", |v: &mut Self, raw| {
            assign_opt(&mut v.poster_image_url, raw)
        }),
        Field::squash("metadata", |v: &mut Self, scope| {
            decode_in(scope, &mut v.metadata)
        }),
    ];
}
