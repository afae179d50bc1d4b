use super::decode::{decode, DecodeError};
use super::TagMap;
use crate::models::{ArticleCard, Card, CardType, ImageCard, LinkCard, VideoCard};

/// The card variant a page's `og:type` asks for.
///
/// Only articles get their own card. Place, product and review cards exist
/// in the schema but page metadata is never mapped onto them.
pub fn card_type_for(og_type: &str) -> CardType {
    match og_type {
        "article" => CardType::Article,
        _ => CardType::Link,
    }
}

/// Build a card from alias-resolved tags.
///
/// `web_url` is the URL that was requested; the card's own URL prefers the
/// page's `og:url`.
pub fn card_from_tags(tags: &TagMap, web_url: &str) -> Result<Card, DecodeError> {
    let og_type = tags.get("og:type").map_or("website", String::as_str);
    let url = tags.get("og:url").map_or(web_url, String::as_str);

    match card_type_for(og_type) {
        CardType::Article => {
            let mut card = ArticleCard::new(web_url, url);
            decode(tags, &mut card.article)?;
            Ok(Card::Article(card))
        }
        CardType::Link
        | CardType::Image
        | CardType::Video
        | CardType::Place
        | CardType::ProductSearch
        | CardType::Product
        | CardType::Review => {
            let mut card = LinkCard::new(web_url, url);
            decode(tags, &mut card.target)?;
            Ok(Card::Link(card))
        }
    }
}

/// Card for a response whose body is an image.
pub fn image_card(url: &str, content_type: &str) -> Result<Card, DecodeError> {
    let mut card = ImageCard::new(url, url);
    card.media.image_details.image_content_type = Some(content_type.to_string());
    decode(&TagMap::new(), &mut card.media)?;
    Ok(Card::Image(card))
}

/// Card for a response whose body is a video stream.
pub fn video_card(url: &str, content_type: &str) -> Result<Card, DecodeError> {
    let mut card = VideoCard::new(url);
    card.media.stream_url = Some(url.to_string());
    card.media.stream_content_type = Some(content_type.to_string());
    decode(&TagMap::new(), &mut card.media)?;
    Ok(Card::Video(card))
}

/// Metadata-free card for anything that is neither markup nor media.
pub fn bare_link_card(url: &str) -> Result<Card, DecodeError> {
    let mut card = LinkCard::new(url, url);
    decode(&TagMap::new(), &mut card.target)?;
    Ok(Card::Link(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{extract_tags, AliasTable, TagVocabulary};
    use crate::models::{AppLink, ImageDetails};

    fn card_for(html: &str, url: &str) -> Card {
        let mut tags = extract_tags(html, &TagVocabulary::default()).unwrap();
        AliasTable::default().resolve(&mut tags);
        card_from_tags(&tags, url).unwrap()
    }

    #[test]
    fn title_tag_becomes_title() {
        let card = card_for("<html><head><title>Foo</title></head></html>", "https://a/b");
        assert_eq!(card.metadata().title.as_deref(), Some("Foo"));
    }

    #[test]
    fn og_title_beats_title_tag() {
        let card = card_for(
            r#"<html><head>
                <title>Page Title</title>
                <meta property="og:title" content="OG Title"/>
            </head></html>"#,
            "https://a/b",
        );
        assert_eq!(card.metadata().title.as_deref(), Some("OG Title"));
    }

    #[test]
    fn duplicate_meta_keeps_first_value() {
        let card = card_for(
            r#"<html><head>
                <meta property="og:title" content="First"/>
                <meta property="og:title" content="Second"/>
            </head></html>"#,
            "https://a/b",
        );
        assert_eq!(card.metadata().title.as_deref(), Some("First"));
    }

    #[test]
    fn app_link_and_image_are_always_present() {
        let card = card_for("<html><head></head></html>", "https://a/b");
        let metadata = card.metadata();
        let app_link = metadata.app_link.as_ref().unwrap();
        assert!(app_link.ios.is_some());
        assert!(app_link.android.is_some());
        assert_eq!(metadata.image, Some(ImageDetails::default()));
    }

    #[test]
    fn article_type_builds_article_card() {
        let card = card_for(
            r#"<meta property="og:type" content="article"/><meta property="og:title" content="T"/>"#,
            "https://a/b",
        );
        let Card::Article(article) = card else {
            panic!("expected an article card, got {card:?}");
        };
        assert_eq!(article.article.abstract_content, "");
        assert_eq!(article.article.metadata.title.as_deref(), Some("T"));
        assert_eq!(article.article.url, "https://a/b");
    }

    #[test]
    fn og_url_preferred_over_requested_url() {
        let card = card_for(
            r#"<meta property="og:url" content="https://x/y"/>"#,
            "https://a/b",
        );
        let Card::Link(link) = card else {
            panic!("expected a link card, got {card:?}");
        };
        assert_eq!(link.target.url, "https://x/y");
        assert_eq!(link.web_url, "https://a/b");
    }

    #[test]
    fn unknown_types_fall_back_to_links() {
        for og_type in ["website", "video.movie", "product", "place", ""] {
            assert_eq!(card_type_for(og_type), CardType::Link, "og:type {og_type:?}");
        }
    }

    #[test]
    fn decodes_full_link_metadata() {
        let card = card_for(
            r#"<html><head>
                <title>ignored</title>
                <link rel="icon" href="/favicon.ico"/>
                <meta name="description" content="Plain description"/>
                <meta property="og:site_name" content="Example"/>
                <meta property="og:image" content="https://a/img.png"/>
                <meta property="og:image:width" content="640"/>
                <meta property="og:image:height" content="tall"/>
                <meta property="article:published_time" content="2024-05-06T07:08:09Z"/>
                <meta name="twitter:title" content="Tweet title"/>
                <meta name="twitter:app:url:iphone" content="example://open"/>
            </head></html>"#,
            "https://a/b",
        );
        let Card::Link(link) = card else {
            panic!("expected a link card, got {card:?}");
        };
        let target = link.target;
        assert_eq!(target.description.as_deref(), Some("Plain description"));

        let metadata = target.metadata;
        assert_eq!(metadata.title.as_deref(), Some("Tweet title"));
        assert_eq!(metadata.source.as_deref(), Some("Example"));
        assert_eq!(metadata.source_icon.as_deref(), Some("/favicon.ico"));
        assert_eq!(
            metadata.publication_date.unwrap().to_rfc3339(),
            "2024-05-06T07:08:09+00:00"
        );

        let image = metadata.image.unwrap();
        assert_eq!(image.image_url, "https://a/img.png");
        assert_eq!(image.width, Some(640));
        assert_eq!(image.height, None);

        let AppLink { iphone, ipad, .. } = metadata.app_link.unwrap();
        assert_eq!(iphone.unwrap().url.as_deref(), Some("example://open"));
        assert!(ipad.unwrap().url.is_none());
    }

    #[test]
    fn image_card_carries_content_type_only() {
        let card = image_card("https://a/pic", "image/png").unwrap();
        assert_eq!(card.card_type(), CardType::Image);
        let Card::Image(image) = &card else {
            unreachable!()
        };
        assert_eq!(image.media.image_details.image_url, "https://a/pic");
        assert_eq!(
            image.media.image_details.image_content_type.as_deref(),
            Some("image/png")
        );
        assert!(card.metadata().title.is_none());
        assert!(card.metadata().app_link.is_some());
        assert!(card.metadata().image.is_some());
    }

    #[test]
    fn video_card_streams_from_the_url() {
        let card = video_card("https://a/clip", "video/mp4").unwrap();
        let Card::Video(video) = card else {
            unreachable!()
        };
        assert_eq!(video.web_url, "https://a/clip");
        assert_eq!(video.media.stream_url.as_deref(), Some("https://a/clip"));
        assert_eq!(video.media.stream_content_type.as_deref(), Some("video/mp4"));
    }

    #[test]
    fn bare_link_has_no_metadata() {
        let card = bare_link_card("https://a/file.zip").unwrap();
        let Card::Link(link) = &card else {
            unreachable!()
        };
        assert_eq!(link.target.url, "https://a/file.zip");
        assert!(link.target.description.is_none());
        assert!(card.metadata().title.is_none());
    }
}
