use poise::{serenity_prelude as serenity, CreateReply};
use serenity::Mentionable;
use thiserror::Error as ThisError;

use std::cmp::Reverse;

use crate::{Context, Error};

pub const PROGRESS_SEGMENTS: usize = 20;
const FILLED_SEGMENT: char = '█';
const EMPTY_SEGMENT: char = '░';

const INFO_COLOUR: serenity::Colour = serenity::Colour::new(0x3498DB);
const PROGRESS_COLOUR: serenity::Colour = serenity::Colour::new(0x9B59B6);

#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProgressError {
    #[error("Please provide a percentage (0-100)!\nUsage: <>progress <number>")]
    Missing,
    #[error("Please provide a valid number between 0 and 100!\nUsage: <>progress <number>")]
    NotANumber,
    #[error("Percentage must be between 0 and 100!\nUsage: <>progress <number>")]
    OutOfRange,
}

pub fn parse_percent(input: Option<&str>) -> Result<u8, ProgressError> {
    let input = input.map(str::trim).filter(|input| !input.is_empty());
    let percent: i64 = input
        .ok_or(ProgressError::Missing)?
        .parse()
        .map_err(|_| ProgressError::NotANumber)?;

    u8::try_from(percent)
        .ok()
        .filter(|percent| *percent <= 100)
        .ok_or(ProgressError::OutOfRange)
}

/// Bar of [`PROGRESS_SEGMENTS`] segments, each one standing for 5%.
pub fn progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = (percent * PROGRESS_SEGMENTS + 50) / 100;

    std::iter::repeat(FILLED_SEGMENT)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_SEGMENT).take(PROGRESS_SEGMENTS - filled))
        .collect()
}

pub fn status_icon(status: &str) -> &'static str {
    match status {
        "online" => "🟢",
        "idle" => "🟡",
        "dnd" => "🔴",
        _ => "⚫",
    }
}

/// `dnd` -> `🔴 Dnd`
pub fn status_field(status: &str) -> String {
    let mut chars = status.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    format!("{} {title}", status_icon(status))
}

pub fn format_date(timestamp: serenity::Timestamp) -> String {
    chrono::DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| String::from("Unknown"))
}

struct ServerSummary {
    name: String,
    member_count: u64,
    created_at: serenity::Timestamp,
    icon_url: Option<String>,
}

/// Show some information about this server
#[poise::command(prefix_command, guild_only)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let summary = ctx.guild().map(|guild| ServerSummary {
        name: guild.name.clone(),
        member_count: guild.member_count,
        created_at: guild.id.created_at(),
        icon_url: guild.icon_url(),
    });

    let Some(summary) = summary else {
        ctx.say("I don't know this server yet, try again in a moment.")
            .await?;
        return Ok(());
    };

    let author = ctx.author();
    let mut footer = serenity::CreateEmbedFooter::new(format!("Requested by {}", author.name));
    if let Some(avatar) = author.avatar_url() {
        footer = footer.icon_url(avatar);
    }

    let mut embed = serenity::CreateEmbed::new()
        .title("Server Information")
        .description("Here's some information about our server!")
        .colour(INFO_COLOUR)
        .field("Server Name", summary.name, true)
        .field("Member Count", summary.member_count.to_string(), true)
        .field("Created At", format_date(summary.created_at), true)
        .footer(footer);

    if let Some(icon) = summary.icon_url {
        embed = embed.thumbnail(icon);
    }

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

struct MemberDetails {
    top_role: String,
    colour: Option<serenity::Colour>,
    status: String,
}

/// Show a member's profile, or your own
#[poise::command(prefix_command, guild_only)]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "Member to show"] member: Option<serenity::Member>,
) -> Result<(), Error> {
    let member = match member {
        Some(member) => member,
        None => match ctx.author_member().await {
            Some(member) => member.into_owned(),
            None => {
                ctx.say("I couldn't find you in this server.").await?;
                return Ok(());
            }
        },
    };

    let details = ctx.guild().map(|guild| {
        let mut roles: Vec<&serenity::Role> = member
            .roles
            .iter()
            .filter_map(|id| guild.roles.get(id))
            .collect();
        roles.sort_by_key(|role| Reverse(role.position));

        MemberDetails {
            top_role: roles
                .first()
                .map(|role| role.name.clone())
                .unwrap_or_else(|| String::from("@everyone")),
            colour: roles
                .iter()
                .find(|role| role.colour.0 != 0)
                .map(|role| role.colour),
            status: guild
                .presences
                .get(&member.user.id)
                .map(|presence| presence.status.name().to_owned())
                .unwrap_or_else(|| String::from("offline")),
        }
    });

    let details = details.unwrap_or_else(|| MemberDetails {
        top_role: String::from("@everyone"),
        colour: None,
        status: String::from("offline"),
    });

    let user = &member.user;
    let joined = member
        .joined_at
        .map(format_date)
        .unwrap_or_else(|| String::from("Unknown"));

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("User Profile - {}", user.name))
        .description(format!("Here's the profile for {}", user.mention()))
        .timestamp(serenity::Timestamp::now())
        .field("Joined Server", joined, true)
        .field("Account Created", format_date(user.created_at()), true)
        .field("Top Role", details.top_role, true)
        .field("Status", status_field(&details.status), true)
        .footer(serenity::CreateEmbedFooter::new(format!("ID: {}", user.id)));

    if let Some(colour) = details.colour {
        embed = embed.colour(colour);
    }
    if let Some(avatar) = user.avatar_url() {
        embed = embed.thumbnail(avatar);
    }

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Draw a progress bar for a percentage
#[poise::command(prefix_command)]
pub async fn progress(
    ctx: Context<'_>,
    #[description = "Percentage from 0 to 100"] percent: Option<String>,
) -> Result<(), Error> {
    let percent = match parse_percent(percent.as_deref()) {
        Ok(percent) => percent,
        Err(why) => {
            ctx.say(why.to_string()).await?;
            return Ok(());
        }
    };

    let embed = serenity::CreateEmbed::new()
        .title("Progress Bar")
        .description(format!("`{}` {percent}%", progress_bar(percent)))
        .colour(PROGRESS_COLOUR);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
