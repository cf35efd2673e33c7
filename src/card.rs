use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::coc::{Clan, Player};

/// Accent colors, one per lookup kind.
const CLAN_COLOR: u32 = 0x0099FF;
const PLAYER_COLOR: u32 = 0x00FF99;

const NO_DESCRIPTION: &str = "No description available";

/// Identity of the user who ran the command, shown in the card footer.
#[derive(Debug, Clone)]
pub struct Requester {
    pub name: String,
    pub avatar_url: String,
}

/// Structured reply payload: everything the embed will show, minus the
/// timestamp (applied when the embed is built).
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCard {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub fields: Vec<(String, String, bool)>,
    pub footer_text: String,
    pub footer_icon: String,
    pub color: u32,
}

impl DisplayCard {
    fn new(requester: &Requester, color: u32) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            thumbnail: None,
            fields: Vec::new(),
            footer_text: format!("Requested by {}", requester.name),
            footer_icon: requester.avatar_url.clone(),
            color,
        }
    }

    pub fn into_embed(self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .color(self.color)
            .title(self.title)
            .description(self.description)
            .fields(self.fields)
            .footer(CreateEmbedFooter::new(self.footer_text).icon_url(self.footer_icon))
            .timestamp(Timestamp::now());

        if let Some(thumbnail) = self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }

        embed
    }
}

pub fn clan_card(clan: &Clan, requester: &Requester) -> DisplayCard {
    let mut card = DisplayCard::new(requester, CLAN_COLOR);
    card.title = format!("{} ({})", clan.name, clan.tag);
    card.description = clan
        .description
        .clone()
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    card.thumbnail = Some(clan.badge_urls.medium.clone());
    card.fields = vec![
        ("Clan Level".to_string(), clan.clan_level.to_string(), true),
        ("Members".to_string(), format!("{}/50", clan.members), true),
        ("Clan Points".to_string(), clan.clan_points.to_string(), true),
        ("War Wins".to_string(), clan.war_wins.to_string(), true),
    ];
    card
}

pub fn player_card(player: &Player, requester: &Requester) -> DisplayCard {
    let mut card = DisplayCard::new(requester, PLAYER_COLOR);
    card.title = format!("{} ({})", player.name, player.tag);
    card.description = format!("Town Hall Level: {}", player.town_hall_level);
    card.fields = vec![
        (
            "Experience Level".to_string(),
            player.exp_level.to_string(),
            true,
        ),
        ("Trophies".to_string(), player.trophies.to_string(), true),
        (
            "Best Trophies".to_string(),
            player.best_trophies.to_string(),
            true,
        ),
        ("War Stars".to_string(), player.war_stars.to_string(), true),
        (
            "Attack Wins".to_string(),
            player.attack_wins.to_string(),
            true,
        ),
        (
            "Defense Wins".to_string(),
            player.defense_wins.to_string(),
            true,
        ),
    ];
    card
}
