use log::{debug, error};
use poise::{serenity_prelude as serenity, CreateReply};

use crate::{
    reactions::menu_title,
    store::{Menu, MenuStore, StoreError},
    Context, Error,
};

pub const NO_MENUS_MESSAGE: &str = "No custom menus found for this server!";
pub const NO_OPTIONS_TEXT: &str = "No options added";

const MENU_COLOUR: serenity::Colour = serenity::Colour::new(0x2ECC71);
const LIST_COLOUR: serenity::Colour = serenity::Colour::new(0x3498DB);

/// One `{emoji} : {description}` line per option.
pub fn option_lines(menu: &Menu) -> String {
    if menu.is_empty() {
        return String::from(NO_OPTIONS_TEXT);
    }

    menu.options
        .iter()
        .map(|(emoji, description)| format!("{emoji} : {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `(menu name, option lines)` for every menu of a server, `None` if it has none.
pub fn menu_list_fields(store: &MenuStore, server: &str) -> Option<Vec<(String, String)>> {
    let menus = store.list_menus(server);

    if menus.is_empty() {
        return None;
    }

    let fields = menus
        .into_iter()
        .map(|(name, menu)| (name.to_owned(), option_lines(menu)))
        .collect();

    Some(fields)
}

pub fn menu_card(name: &str, menu: &Menu) -> serenity::CreateEmbed {
    let fields = menu
        .options
        .iter()
        .map(|(emoji, description)| (emoji.as_str(), description.as_str(), false));

    serenity::CreateEmbed::new()
        .title(menu_title(name))
        .description("React to select an option:")
        .colour(MENU_COLOUR)
        .fields(fields)
}

fn server_key(ctx: Context<'_>) -> Result<String, Error> {
    let guild_id = ctx.guild_id().ok_or("menus only exist inside servers")?;
    Ok(guild_id.to_string())
}

/// Reply text for a failed store operation. File problems are logged and hidden.
fn store_failure(why: StoreError) -> String {
    if why.is_user_error() {
        return why.to_string();
    }

    error!("menu store failure: {why}");
    String::from("Something went wrong while saving the menus, please try again later.")
}

async fn send_menu_list(ctx: Context<'_>) -> Result<(), Error> {
    let server = server_key(ctx)?;
    let fields = {
        let store = ctx.data().menus.lock().await;
        menu_list_fields(&store, &server)
    };

    let Some(fields) = fields else {
        ctx.say(NO_MENUS_MESSAGE).await?;
        return Ok(());
    };

    let embed = serenity::CreateEmbed::new()
        .title("Custom Menus")
        .description("Here are all the custom menus for this server:")
        .colour(LIST_COLOUR)
        .fields(fields.into_iter().map(|(name, lines)| (name, lines, false)));

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show a menu to pick from, or list the menus of this server
#[poise::command(prefix_command, guild_only)]
pub async fn menu(
    ctx: Context<'_>,
    #[description = "Name of the menu to show"] menu_name: Option<String>,
) -> Result<(), Error> {
    let Some(menu_name) = menu_name else {
        return send_menu_list(ctx).await;
    };

    let server = server_key(ctx)?;
    let menu = ctx
        .data()
        .menus
        .lock()
        .await
        .get_menu(&server, &menu_name)
        .cloned();

    let Some(menu) = menu else {
        ctx.say(format!(
            "Menu '{menu_name}' not found! Use {}list_menus to see available menus.",
            ctx.prefix()
        ))
        .await?;
        return Ok(());
    };

    let reply = ctx
        .send(CreateReply::default().embed(menu_card(&menu_name, &menu)))
        .await?;
    let message = reply.message().await?;

    let mut unusable = Vec::new();
    for emoji in menu.options.keys() {
        let reacted: Result<(), Error> = match serenity::ReactionType::try_from(emoji.as_str()) {
            Ok(reaction) => message
                .react(ctx.serenity_context(), reaction)
                .await
                .map(|_| ())
                .map_err(Into::into),
            Err(why) => Err(why.into()),
        };

        if let Err(why) = reacted {
            error!("could not react with {emoji} on menu '{menu_name}': {why:?}");
            unusable.push(emoji.as_str());
        }
    }

    if !unusable.is_empty() {
        ctx.say(format!(
            "I couldn't add these options as reactions: {}",
            unusable.join(" ")
        ))
        .await?;
    }

    Ok(())
}

/// Create a new custom menu for this server
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn create_menu(
    ctx: Context<'_>,
    #[description = "Name of the new menu"] menu_name: String,
) -> Result<(), Error> {
    let server = server_key(ctx)?;
    let result = ctx.data().menus.lock().await.create_menu(&server, &menu_name);

    let content = match result {
        Ok(()) => format!(
            "Created new menu '{menu_name}'. Use {prefix}add_option {menu_name} <emoji> <description> to add options!",
            prefix = ctx.prefix()
        ),
        Err(why) => store_failure(why),
    };

    ctx.say(content).await?;
    Ok(())
}

/// Add an option to a custom menu, replacing it if the emoji is already used
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn add_option(
    ctx: Context<'_>,
    #[description = "Name of the menu"] menu_name: String,
    #[description = "Emoji that selects the option"] emoji: String,
    #[description = "What the option stands for"]
    #[rest]
    description: String,
) -> Result<(), Error> {
    let description = description.trim();
    if description.is_empty() {
        ctx.say(format!(
            "Please describe the option!\nUsage: {}add_option <menu> <emoji> <description>",
            ctx.prefix()
        ))
        .await?;
        return Ok(());
    }

    let server = server_key(ctx)?;
    let result = ctx
        .data()
        .menus
        .lock()
        .await
        .add_option(&server, &menu_name, &emoji, description);

    let content = match result {
        Ok(()) => format!("Added option {emoji} to menu '{menu_name}'!"),
        Err(StoreError::MenuNotFound(_)) => format!(
            "Menu '{menu_name}' not found! Create it first with {}create_menu {menu_name}",
            ctx.prefix()
        ),
        Err(why) => store_failure(why),
    };

    ctx.say(content).await?;
    Ok(())
}

/// Remove an option from a custom menu
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn remove_option(
    ctx: Context<'_>,
    #[description = "Name of the menu"] menu_name: String,
    #[description = "Emoji of the option to remove"] emoji: String,
) -> Result<(), Error> {
    let server = server_key(ctx)?;
    let result = ctx
        .data()
        .menus
        .lock()
        .await
        .remove_option(&server, &menu_name, &emoji);

    let content = match result {
        Ok(()) => {
            debug!("option {emoji} removed from '{menu_name}' by {}", ctx.author().id);
            format!("Removed option {emoji} from menu '{menu_name}'!")
        }
        Err(why) => store_failure(why),
    };

    ctx.say(content).await?;
    Ok(())
}

/// List all custom menus of this server with their options
#[poise::command(prefix_command, guild_only)]
pub async fn list_menus(ctx: Context<'_>) -> Result<(), Error> {
    send_menu_list(ctx).await
}
