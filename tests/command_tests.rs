#![cfg(test)]

use menubot::commands::{cards::*, menus::*};
use menubot::store::{Menu, MenuStore};

use std::{env, fs};

#[test]
fn test_progress_half_is_ten_and_ten() {
    let bar = progress_bar(parse_percent(Some("50")).unwrap());
    assert_eq!(bar.chars().count(), PROGRESS_SEGMENTS);
    assert_eq!(bar.chars().filter(|c| *c == '█').count(), 10);
    assert_eq!(bar.chars().filter(|c| *c == '░').count(), 10);
}

#[test]
fn test_progress_bounds() {
    assert_eq!(progress_bar(0), "░".repeat(20));
    assert_eq!(progress_bar(100), "█".repeat(20));
    assert_eq!(progress_bar(12).chars().filter(|c| *c == '█').count(), 2);
    assert_eq!(progress_bar(13).chars().filter(|c| *c == '█').count(), 3);
}

#[test]
fn test_progress_rejects_bad_input_with_usage() {
    for input in [Some("101"), Some("-1"), Some("abc"), Some("50.5"), None] {
        let why = parse_percent(input).unwrap_err();
        assert!(why.to_string().contains("Usage: <>progress <number>"), "{input:?}");
    }

    assert_eq!(parse_percent(Some("101")), Err(ProgressError::OutOfRange));
    assert_eq!(parse_percent(Some("-1")), Err(ProgressError::OutOfRange));
    assert_eq!(parse_percent(Some("abc")), Err(ProgressError::NotANumber));
    assert_eq!(parse_percent(Some("  ")), Err(ProgressError::Missing));
    assert_eq!(parse_percent(Some(" 100 ")), Ok(100));
}

#[test]
fn test_status_icons() {
    assert_eq!(status_icon("online"), "🟢");
    assert_eq!(status_icon("idle"), "🟡");
    assert_eq!(status_icon("dnd"), "🔴");
    assert_eq!(status_icon("offline"), "⚫");
    assert_eq!(status_icon("something else"), "⚫");
}

#[test]
fn test_list_menus_without_menus() {
    let path = env::temp_dir().join(format!("menubot-list-{}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    let mut store = MenuStore::load(&path).unwrap();

    assert_eq!(menu_list_fields(&store, "1"), None);

    store.create_menu("1", "lunch").unwrap();
    store.create_menu("1", "games").unwrap();
    store.add_option("1", "lunch", "🍕", "Pizza").unwrap();
    store.add_option("1", "lunch", "🌮", "Taco").unwrap();

    let fields = menu_list_fields(&store, "1").unwrap();
    assert_eq!(
        fields,
        vec![
            (String::from("lunch"), String::from("🍕 : Pizza\n🌮 : Taco")),
            (String::from("games"), String::from(NO_OPTIONS_TEXT)),
        ]
    );
    assert_eq!(menu_list_fields(&store, "2"), None);
    fs::remove_file(path).unwrap();
}

#[test]
fn test_menu_card_lists_options_in_order() {
    let mut menu = Menu::default();
    menu.options.insert(String::from("❌"), String::from("No"));
    menu.options.insert(String::from("✅"), String::from("Yes"));

    assert_eq!(option_lines(&menu), "❌ : No\n✅ : Yes");

    let card = serde_json::to_value(menu_card("vote", &menu)).unwrap();
    assert_eq!(card["title"], "Menu: vote");
    assert_eq!(menubot::reactions::menu_name_from_title(card["title"].as_str().unwrap()), Some("vote"));
    assert_eq!(card["description"], "React to select an option:");

    let fields = card["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["name"], "❌");
    assert_eq!(fields[0]["value"], "No");
    assert_eq!(fields[0]["inline"], false);
    assert_eq!(fields[1]["name"], "✅");
    assert_eq!(fields[1]["value"], "Yes");
    assert_eq!(fields[1]["inline"], false);
}
