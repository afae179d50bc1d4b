//! robots.txt permission checks. Every failure to obtain a verdict permits.

use texting_robots::Robot;
use url::{Position, Url};

use super::client::HttpFetcher;

/// `scheme://host[:port]/robots.txt` for the site serving `target`.
pub fn robots_url(target: &Url) -> Url {
    let mut robots = target.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots
}

/// The product token robots.txt groups are matched against, e.g.
/// `CardFetcher` for `CardFetcher/1.0 (like facebookexternalhit)`.
pub fn agent_token(user_agent: &str) -> &str {
    user_agent
        .split(|c: char| c == '/' || c.is_whitespace())
        .find(|token| !token.is_empty())
        .unwrap_or(user_agent)
}

/// Whether `robots_txt` lets `agent` fetch `target`. `None` when the file
/// cannot be parsed.
pub fn evaluate(robots_txt: &[u8], agent: &str, target: &Url) -> Option<bool> {
    let robot = Robot::new(agent, robots_txt).ok()?;
    Some(robot.allowed(&target[..Position::AfterQuery]))
}

/// Fetch and evaluate the robots.txt governing `target`.
pub async fn is_permitted(fetcher: &HttpFetcher, target: &Url, agent: &str) -> bool {
    let location = robots_url(target);

    let response = match fetcher.get(&location).await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::debug!(url = %location, status = %response.status(), "No usable robots.txt, permitting");
            return true;
        }
        Err(e) => {
            tracing::warn!(error = %e, url = %location, "robots.txt unreachable, permitting");
            return true;
        }
    };

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, url = %location, "robots.txt body unreadable, permitting");
            return true;
        }
    };

    evaluate(&body, agent, target).unwrap_or_else(|| {
        tracing::warn!(url = %location, "robots.txt unparsable, permitting");
        true
    })
}
