use crate::{Context, Error};

#[poise::command(prefix_command, track_edits)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Show help"] command: Option<String>,
) -> Result<(), Error> {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom:
                "Menubot renders embed cards and lets server admins build reaction menus",
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}

/// Report the gateway round-trip latency
#[poise::command(prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    ctx.say(format!("Pong! Latency: {}ms", latency.as_millis()))
        .await?;
    Ok(())
}
