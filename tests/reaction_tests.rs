#![cfg(test)]

use menubot::reactions::*;
use menubot::store::MenuStore;
use poise::serenity_prelude::UserId;

use std::{env, fs, path::PathBuf};

const SERVER: &str = "987654321";

fn bot() -> UserId {
    UserId::new(7)
}

fn lunch_store(path: &PathBuf) -> MenuStore {
    let _ = fs::remove_file(path);
    let mut store = MenuStore::load(path).unwrap();
    store.create_menu(SERVER, "lunch").unwrap();
    store.add_option(SERVER, "lunch", "🍕", "Pizza").unwrap();
    store
}

fn reaction<'a>(title: Option<&'a str>, emoji: &'a str) -> MenuReaction<'a> {
    MenuReaction {
        server: SERVER,
        card_title: title,
        reactor: UserId::new(42),
        bot: bot(),
        emoji,
    }
}

#[test]
fn test_known_option_is_announced_once() {
    let path = env::temp_dir().join(format!("menubot-react-ok-{}.json", std::process::id()));
    let store = lunch_store(&path);
    let title = menu_title("lunch");

    let announcement = selection_announcement(&store, &reaction(Some(&title), "🍕"));
    assert_eq!(announcement.as_deref(), Some("<@42> selected 🍕: Pizza"));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_unknown_option_is_ignored() {
    let path = env::temp_dir().join(format!("menubot-react-no-{}.json", std::process::id()));
    let store = lunch_store(&path);
    let title = menu_title("lunch");

    assert_eq!(selection_announcement(&store, &reaction(Some(&title), "🌮")), None);
    assert_eq!(selection_announcement(&store, &reaction(Some("Menu: dinner"), "🍕")), None);
    assert_eq!(selection_announcement(&store, &reaction(Some("Custom Menus"), "🍕")), None);
    assert_eq!(selection_announcement(&store, &reaction(None, "🍕")), None);

    let other_server = MenuReaction {
        server: "1",
        ..reaction(Some(&title), "🍕")
    };
    assert_eq!(selection_announcement(&store, &other_server), None);
    fs::remove_file(path).unwrap();
}

#[test]
fn test_bot_seeded_reaction_is_ignored() {
    let path = env::temp_dir().join(format!("menubot-react-bot-{}.json", std::process::id()));
    let store = lunch_store(&path);
    let title = menu_title("lunch");

    let seeded = MenuReaction {
        reactor: bot(),
        ..reaction(Some(&title), "🍕")
    };
    assert_eq!(selection_announcement(&store, &seeded), None);
    assert!(!could_pick_option(&store, SERVER, bot(), bot()));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_servers_without_menus_skip_the_lookup() {
    let path = env::temp_dir().join(format!("menubot-react-empty-{}.json", std::process::id()));
    let store = lunch_store(&path);

    assert!(could_pick_option(&store, SERVER, UserId::new(42), bot()));
    assert!(!could_pick_option(&store, "1", UserId::new(42), bot()));
    fs::remove_file(path).unwrap();
}
