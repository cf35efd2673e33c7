use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::CocConfig;

/// Unified lookup failure. The variants exist so operator logs can tell a
/// bad tag from a bad token or a dead proxy; none of the detail reaches the
/// end user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API base URL: {0}")]
    BaseUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API responded with status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub description: Option<String>,
    pub badge_urls: BadgeUrls,
    pub clan_level: u32,
    pub members: u32,
    pub clan_points: u32,
    pub war_wins: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BadgeUrls {
    pub medium: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub tag: String,
    pub town_hall_level: u32,
    pub exp_level: u32,
    pub trophies: u32,
    pub best_trophies: u32,
    pub war_stars: u32,
    pub attack_wins: u32,
    pub defense_wins: u32,
}

/// Builds `{base}/{collection}/{tag}` with the tag percent-encoded as a path
/// segment (clan and player tags start with `#`).
fn lookup_url(base: &str, collection: &str, tag: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|e| FetchError::BaseUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::BaseUrl(base.to_string()))?
        .push(collection)
        .push(tag);
    Ok(url)
}

pub struct CocClient {
    client: reqwest::Client,
    config: CocConfig,
}

impl CocClient {
    pub fn new(config: CocConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn clan(&self, tag: &str) -> Result<Clan, FetchError> {
        self.fetch("clans", tag).await
    }

    pub async fn player(&self, tag: &str) -> Result<Player, FetchError> {
        self.fetch("players", tag).await
    }

    /// One GET, one attempt. Non-2xx and decode failures both surface as
    /// `FetchError`.
    async fn fetch<T: DeserializeOwned>(&self, collection: &str, tag: &str) -> Result<T, FetchError> {
        let url = lookup_url(&self.config.base_url, collection, tag)?;

        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_token),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cocproxy.royaleapi.dev/v1";

    #[test]
    fn test_lookup_url_encodes_tag() {
        let url = lookup_url(BASE, "clans", "#2P0LYQ09V").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cocproxy.royaleapi.dev/v1/clans/%232P0LYQ09V"
        );
    }

    #[test]
    fn test_lookup_url_player_path() {
        let url = lookup_url(BASE, "players", "#8QU8J9LP").unwrap();
        assert_eq!(url.path(), "/v1/players/%238QU8J9LP");
    }

    #[test]
    fn test_lookup_url_rejects_bad_base() {
        assert!(lookup_url("not a url", "clans", "#AAA").is_err());
    }

    #[test]
    fn test_clan_decodes_camel_case() {
        let clan: Clan = serde_json::from_str(
            r##"{
                "name": "Test Clan",
                "tag": "#2P0LYQ09V",
                "description": "Friendly wars",
                "badgeUrls": {"small": "s", "medium": "m", "large": "l"},
                "clanLevel": 10,
                "members": 37,
                "clanPoints": 25000,
                "warWins": 150
            }"##,
        )
        .unwrap();

        assert_eq!(clan.name, "Test Clan");
        assert_eq!(clan.description.as_deref(), Some("Friendly wars"));
        assert_eq!(clan.badge_urls.medium, "m");
        assert_eq!(clan.clan_level, 10);
        assert_eq!(clan.war_wins, 150);
    }

    #[test]
    fn test_clan_description_is_optional() {
        let clan: Clan = serde_json::from_str(
            r##"{
                "name": "Quiet Clan",
                "tag": "#AAA",
                "badgeUrls": {"medium": "m"},
                "clanLevel": 1,
                "members": 3,
                "clanPoints": 90,
                "warWins": 0
            }"##,
        )
        .unwrap();

        assert_eq!(clan.description, None);
    }

    #[test]
    fn test_player_decodes_camel_case() {
        let player: Player = serde_json::from_str(
            r##"{
                "name": "Chief",
                "tag": "#8QU8J9LP",
                "townHallLevel": 13,
                "expLevel": 180,
                "trophies": 4100,
                "bestTrophies": 5200,
                "warStars": 900,
                "attackWins": 120,
                "defenseWins": 45
            }"##,
        )
        .unwrap();

        assert_eq!(player.town_hall_level, 13);
        assert_eq!(player.best_trophies, 5200);
        assert_eq!(player.defense_wins, 45);
    }
}
