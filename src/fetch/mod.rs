//! Turns a URL into a card: robots.txt check, fetch, content-type branch,
//! then either metadata decoding or a media card.

pub mod client;
pub mod robots;
pub mod sniff;

use std::time::Duration;

use url::Url;

use crate::config::{Config, DEFAULT_FETCH_MAX_RETRIES, DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{AppError, AppResult};
use crate::metadata::{card_from_tags, dispatch, extract_tags, AliasTable, TagVocabulary};
use crate::models::Card;
use client::HttpFetcher;
use sniff::{BodyKind, SNIFF_LEN};

/// Everything a [`Scraper`] needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub check_robots_txt: bool,
    pub timeout: Duration,
    pub max_retries: u32,
    pub vocabulary: TagVocabulary,
    pub aliases: AliasTable,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            check_robots_txt: true,
            timeout: DEFAULT_FETCH_TIMEOUT,
            max_retries: DEFAULT_FETCH_MAX_RETRIES,
            vocabulary: TagVocabulary::default(),
            aliases: AliasTable::default(),
        }
    }
}

impl From<&Config> for ScraperConfig {
    fn from(config: &Config) -> Self {
        ScraperConfig {
            user_agent: config.user_agent.clone(),
            check_robots_txt: config.check_robots_txt,
            timeout: config.fetch_timeout,
            max_retries: config.fetch_max_retries,
            ..ScraperConfig::default()
        }
    }
}

/// Fetches pages and describes them as cards. Cheap to share: requests run
/// independently and only the HTTP client's pool and cookie jar are common.
#[derive(Debug)]
pub struct Scraper {
    config: ScraperConfig,
    fetcher: HttpFetcher,
}

impl Scraper {
    pub fn new(config: ScraperConfig) -> AppResult<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.timeout, config.max_retries)?;
        Ok(Scraper { config, fetcher })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Build a card from markup that has already been fetched from `url`.
    pub fn parse_tags(&self, html: &str, url: &str) -> AppResult<Card> {
        let mut tags = extract_tags(html, &self.config.vocabulary)?;
        self.config.aliases.resolve(&mut tags);
        Ok(card_from_tags(&tags, url)?)
    }

    /// Fetch `url` and describe it as a card.
    pub async fn fetch_card(&self, url: &str) -> AppResult<Card> {
        let target = parse_target(url)?;

        if self.config.check_robots_txt {
            let agent = robots::agent_token(&self.config.user_agent);
            if !robots::is_permitted(&self.fetcher, &target, agent).await {
                tracing::info!(url = %url, "Fetch forbidden by robots.txt");
                return Err(AppError::RobotsDenied(url.to_string()));
            }
        }

        tracing::debug!(url = %url, "Fetching");
        let mut response = self
            .fetcher
            .get(&target)
            .await
            .map_err(|e| transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| transport(url, e))?;
            return Err(AppError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let declared = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let card = if sniff::declares_markup(&declared) {
            tracing::debug!(url = %url, content_type = %declared, "Extracting tags");
            let html = response.text().await.map_err(|e| transport(url, e))?;
            self.parse_tags(&html, url)?
        } else {
            let mut body = client::read_prefix(&mut response, SNIFF_LEN)
                .await
                .map_err(|e| transport(url, e))?;
            let content_type = sniff::effective_type(&declared, &body);
            tracing::debug!(url = %url, declared = %declared, sniffed = %content_type, "Sniffed body");

            match sniff::classify(&content_type) {
                BodyKind::Markup => {
                    client::read_rest(&mut response, &mut body)
                        .await
                        .map_err(|e| transport(url, e))?;
                    self.parse_tags(&String::from_utf8_lossy(&body), url)?
                }
                BodyKind::Image(content_type) => dispatch::image_card(url, &content_type)?,
                BodyKind::Video(content_type) => dispatch::video_card(url, &content_type)?,
                BodyKind::Other(_) => dispatch::bare_link_card(url)?,
            }
        };

        tracing::info!(url = %url, card_type = %card.card_type(), "Card built");
        Ok(card)
    }
}

fn parse_target(url: &str) -> AppResult<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| AppError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::InvalidUrl(format!(
                "{url}: only http/https URLs are supported, got {other}"
            )))
        }
    }
    if parsed.host_str().is_none() {
        return Err(AppError::InvalidUrl(format!("{url}: URL has no host")));
    }
    Ok(parsed)
}

fn transport(url: &str, e: reqwest::Error) -> AppError {
    AppError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    }
}
