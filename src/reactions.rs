use log::debug;
use poise::serenity_prelude as serenity;
use regex::Regex;
use serenity::Mentionable;

use std::sync::LazyLock;

use crate::{store::MenuStore, Data, Error};

pub const MENU_TITLE_PREFIX: &str = "Menu: ";

static MENU_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^Menu: (.+)$").unwrap());

/// Title of the card rendered for a menu. Reactions find their menu again through it.
pub fn menu_title(name: &str) -> String {
    format!("{MENU_TITLE_PREFIX}{name}")
}

pub fn menu_name_from_title(title: &str) -> Option<&str> {
    MENU_TITLE
        .captures(title)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

/// A reaction someone added to a message, reduced to what menu routing looks at.
pub struct MenuReaction<'a> {
    pub server: &'a str,
    pub card_title: Option<&'a str>,
    pub reactor: serenity::UserId,
    /// The bot's own user, which seeds every menu card with reactions.
    pub bot: serenity::UserId,
    pub emoji: &'a str,
}

/// Checks that need no message fetch: not the bot's own reaction, and the
/// server has at least one menu.
pub fn could_pick_option(
    store: &MenuStore,
    server: &str,
    reactor: serenity::UserId,
    bot: serenity::UserId,
) -> bool {
    reactor != bot && !store.list_menus(server).is_empty()
}

/// Resolves a reaction to the announcement it should produce, if the reaction
/// lands on a menu card and picks one of that menu's options.
pub fn selection_announcement(store: &MenuStore, reaction: &MenuReaction<'_>) -> Option<String> {
    if !could_pick_option(store, reaction.server, reaction.reactor, reaction.bot) {
        return None;
    }

    let name = menu_name_from_title(reaction.card_title?)?;
    let description = store.get_menu(reaction.server, name)?.option(reaction.emoji)?;

    Some(format!(
        "{} selected {}: {}",
        reaction.reactor.mention(),
        reaction.emoji,
        description
    ))
}

pub async fn handle_reaction_add(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    data: &Data,
) -> Result<(), Error> {
    let (Some(reactor), Some(guild_id)) = (reaction.user_id, reaction.guild_id) else {
        return Ok(());
    };

    let bot = ctx.cache.current_user().id;
    let server = guild_id.to_string();

    if !could_pick_option(&*data.menus.lock().await, &server, reactor, bot) {
        return Ok(());
    }

    let message = reaction.message(ctx).await?;
    let emoji = reaction.emoji.to_string();

    let announcement = {
        let store = data.menus.lock().await;
        selection_announcement(
            &store,
            &MenuReaction {
                server: &server,
                card_title: message.embeds.first().and_then(|embed| embed.title.as_deref()),
                reactor,
                bot,
                emoji: &emoji,
            },
        )
    };

    match announcement {
        Some(content) => {
            debug!("user {reactor} picked {emoji} on message {}", message.id);
            reaction.channel_id.say(&ctx.http, content).await?;
        }
        None => debug!("reaction {emoji} on message {} is not a menu pick", message.id),
    }

    Ok(())
}
