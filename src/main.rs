use clap::Parser;

use log::{error, info};

use poise::serenity_prelude as serenity;

use std::{sync::Arc, time::Duration};

use menubot::{
    commands::{cards::*, menus::*, utils::*},
    config::{init_logging, CLArgs, Config},
    reactions,
    store::MenuStore,
    Data, Error,
};

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error,);
            if let Err(e) = ctx.say("Something went wrong while running that command.").await {
                error!("Error while reporting command error: {}", e)
            }
        }
        poise::FrameworkError::EventHandler { error, .. } => {
            error!("Error in event handler: {:?}", error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e)
            }
        }
    }
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            info!(
                "{} is connected to {} guild(s)",
                data_about_bot.user.name,
                data_about_bot.guilds.len()
            );
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            reactions::handle_reaction_add(ctx, add_reaction, data).await?;
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(why) = run().await {
        error!("Failed to start bot: {}", why);
        eprintln!("Failed to start bot: {why}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let clargs = CLArgs::parse();
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install rustls crypto provider")?;
    let _ = dotenvy::dotenv();

    init_logging(&clargs.loglevel);

    let config = Config::from_env(&clargs)?;

    info!("Starting...");

    let store = MenuStore::load(&config.menus_file)?;
    info!(
        "Loaded menus for {} server(s) from {}",
        store.server_count(),
        store.path().display()
    );

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_PRESENCES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let options = poise::FrameworkOptions {
        commands: vec![
            help(),
            ping(),
            info(),
            profile(),
            progress(),
            menu(),
            create_menu(),
            add_option(),
            remove_option(),
            list_menus(),
        ],
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(config.prefix.clone()),
            edit_tracker: Some(Arc::new(poise::EditTracker::for_timespan(
                Duration::from_secs(3600),
            ))),
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!("Executing command {}...", ctx.command().qualified_name);
            })
        },
        post_command: |ctx| {
            Box::pin(async move {
                info!("Executed command {}!", ctx.command().qualified_name);
            })
        },
        skip_checks_for_owners: false,
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .setup(move |_ctx, _ready, _framework| Box::pin(async move { Ok(Data::new(store)) }))
        .options(options)
        .build();

    let mut client = serenity::Client::builder(&config.token, intents)
        .framework(framework)
        .await?;
    let shard_manager = client.shard_manager.clone();

    // a rejected token or disallowed intents end `start`, and with it the process
    tokio::select! {
        result = client.start() => {
            result.map_err(|why| {
                error!("client ended: {:?}", why);
                why
            })?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down.");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}
