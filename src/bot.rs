use serenity::all::{
    Command, CommandDataOption, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler,
    Interaction, Ready,
};
use serenity::async_trait;
use tracing::{error, info};

use crate::card::{self, Requester};
use crate::coc::CocClient;

/// The closed set of commands this bot answers. Anything else arriving on the
/// gateway is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlashCommand {
    Clan,
    Player,
}

impl SlashCommand {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "clan" => Some(Self::Clan),
            "player" => Some(Self::Player),
            _ => None,
        }
    }

    /// Lowercase noun used in the user-facing error message.
    fn noun(self) -> &'static str {
        match self {
            Self::Clan => "clan",
            Self::Player => "player",
        }
    }
}

fn fetch_error_reply(command: SlashCommand, tag: &str) -> String {
    format!(
        "Error: Could not fetch {} data for tag {}.",
        command.noun(),
        tag
    )
}

/// The `tag` option is marked required at registration, so Discord guarantees
/// it is present on well-formed interactions.
fn tag_option(options: &[CommandDataOption]) -> Option<&str> {
    options
        .iter()
        .find(|option| option.name == "tag")
        .and_then(|option| option.value.as_str())
}

fn command_definitions() -> Vec<CreateCommand> {
    let tag = || {
        CreateCommandOption::new(CommandOptionType::String, "tag", "Tag (e.g., #2P0LYQ09V)")
            .required(true)
    };

    vec![
        CreateCommand::new("clan")
            .description("Look up a Clash of Clans clan by tag")
            .add_option(tag()),
        CreateCommand::new("player")
            .description("Look up a Clash of Clans player by tag")
            .add_option(tag()),
    ]
}

/// Discord event handler: registers the slash commands once connected and
/// answers each invocation with exactly one reply.
pub struct Handler {
    coc: CocClient,
}

impl Handler {
    pub fn new(coc: CocClient) -> Self {
        Self { coc }
    }

    async fn handle_command(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
        command: SlashCommand,
    ) -> serenity::Result<()> {
        let Some(tag) = tag_option(&interaction.data.options) else {
            return Ok(());
        };

        info!(
            "Command /{} from {} for tag {}",
            command.noun(),
            interaction.user.name,
            tag
        );

        let requester = Requester {
            name: interaction.user.tag(),
            avatar_url: interaction.user.face(),
        };

        let card = match command {
            SlashCommand::Clan => self
                .coc
                .clan(tag)
                .await
                .map(|clan| card::clan_card(&clan, &requester)),
            SlashCommand::Player => self
                .coc
                .player(tag)
                .await
                .map(|player| card::player_card(&player, &requester)),
        };

        let message = match card {
            Ok(card) => CreateInteractionResponseMessage::new().embed(card.into_embed()),
            Err(e) => {
                error!("Error fetching {} data for tag {}: {}", command.noun(), tag, e);
                CreateInteractionResponseMessage::new().content(fetch_error_reply(command, tag))
            }
        };

        interaction
            .create_response(&ctx.http, CreateInteractionResponse::Message(message))
            .await
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);

        match Command::set_global_commands(&ctx.http, command_definitions()).await {
            Ok(commands) => info!("Registered {} slash commands", commands.len()),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(interaction) = interaction else {
            return;
        };

        let Some(command) = SlashCommand::parse(&interaction.data.name) else {
            return;
        };

        if let Err(e) = self.handle_command(&ctx, &interaction, command).await {
            error!("Failed to send reply for /{}: {}", command.noun(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(SlashCommand::parse("clan"), Some(SlashCommand::Clan));
        assert_eq!(SlashCommand::parse("player"), Some(SlashCommand::Player));
    }

    #[test]
    fn test_parse_unrecognized_command_is_none() {
        assert_eq!(SlashCommand::parse("ping"), None);
        assert_eq!(SlashCommand::parse("Clan"), None);
        assert_eq!(SlashCommand::parse(""), None);
    }

    #[test]
    fn test_fetch_error_reply_format() {
        assert_eq!(
            fetch_error_reply(SlashCommand::Clan, "#2P0LYQ09V"),
            "Error: Could not fetch clan data for tag #2P0LYQ09V."
        );
        assert_eq!(
            fetch_error_reply(SlashCommand::Player, "#8QU8J9LP"),
            "Error: Could not fetch player data for tag #8QU8J9LP."
        );
    }

    #[test]
    fn test_command_definitions_cover_both_commands() {
        let definitions = command_definitions();
        assert_eq!(definitions.len(), 2);
    }
}
