//! Per-server menu definitions, kept in memory and flushed to a JSON file.
//!
//! The file layout is `{ serverId: { menuName: { "options": { emoji: description } } } }`.
//! Every mutation rewrites the whole file before it returns.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

pub const DEFAULT_MENUS_FILE: &str = "server_menus.json";

/// Menu name -> menu, for a single server, in creation order.
pub type ServerMenus = IndexMap<String, Menu>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Emoji key -> option description, in the order the options were added.
    #[serde(default)]
    pub options: IndexMap<String, String>,
}

impl Menu {
    pub fn option(&self, emoji: &str) -> Option<&str> {
        self.options.get(emoji).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A menu named '{0}' already exists!")]
    AlreadyExists(String),
    #[error("Menu '{0}' not found!")]
    MenuNotFound(String),
    #[error("Option {emoji} not found in menu '{menu}'!")]
    OptionNotFound { menu: String, emoji: String },
    #[error("could not access menu file: {0}")]
    Io(#[from] io::Error),
    #[error("menu file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Errors caused by the request itself rather than by the menu file.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists(_) | Self::MenuNotFound(_) | Self::OptionNotFound { .. }
        )
    }
}

#[derive(Debug)]
pub struct MenuStore {
    path: PathBuf,
    servers: IndexMap<String, ServerMenus>,
}

impl MenuStore {
    /// Reads the menu file at `path`. A missing file yields an empty store,
    /// anything unreadable or malformed is returned as an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let servers = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(why) if why.kind() == ErrorKind::NotFound => {
                debug!("no menu file at {}, starting empty", path.display());
                IndexMap::new()
            }
            Err(why) => return Err(why.into()),
        };

        Ok(Self { path, servers })
    }

    /// Overwrites the menu file with the full in-memory mapping.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.servers.serialize(&mut serializer)?;
        fs::write(&self.path, buf)?;

        debug!("saved menus for {} server(s) to {}", self.servers.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    pub fn create_menu(&mut self, server: &str, name: &str) -> Result<(), StoreError> {
        let new_server = !self.servers.contains_key(server);
        let menus = self.servers.entry(server.to_owned()).or_default();

        if menus.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_owned()));
        }

        menus.insert(name.to_owned(), Menu::default());
        debug!("created menu '{name}' in server {server}");

        self.save_or_undo(|store| {
            if new_server {
                store.servers.shift_remove(server);
            } else if let Some(menus) = store.servers.get_mut(server) {
                menus.shift_remove(name);
            }
        })
    }

    /// Inserts the option, replacing the description if `emoji` is already a key.
    /// A replaced option keeps its position.
    pub fn add_option(
        &mut self,
        server: &str,
        name: &str,
        emoji: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let menu = self
            .menu_mut(server, name)
            .ok_or_else(|| StoreError::MenuNotFound(name.to_owned()))?;

        let previous = menu.options.insert(emoji.to_owned(), description.to_owned());
        debug!("set option {emoji} on menu '{name}' in server {server}");

        self.save_or_undo(|store| {
            let Some(menu) = store.menu_mut(server, name) else {
                return;
            };

            match previous {
                Some(previous) => {
                    menu.options.insert(emoji.to_owned(), previous);
                }
                None => {
                    menu.options.shift_remove(emoji);
                }
            }
        })
    }

    pub fn remove_option(&mut self, server: &str, name: &str, emoji: &str) -> Result<(), StoreError> {
        let menu = self
            .menu_mut(server, name)
            .ok_or_else(|| StoreError::MenuNotFound(name.to_owned()))?;

        let Some((index, key, description)) = menu.options.shift_remove_full(emoji) else {
            return Err(StoreError::OptionNotFound {
                menu: name.to_owned(),
                emoji: emoji.to_owned(),
            });
        };

        debug!("removed option {emoji} from menu '{name}' in server {server}");

        self.save_or_undo(|store| {
            if let Some(menu) = store.menu_mut(server, name) {
                menu.options.shift_insert(index, key, description);
            }
        })
    }

    pub fn get_menu(&self, server: &str, name: &str) -> Option<&Menu> {
        self.servers.get(server)?.get(name)
    }

    /// All menus of a server, in creation order.
    pub fn list_menus(&self, server: &str) -> Vec<(&str, &Menu)> {
        self.servers
            .get(server)
            .map(|menus| menus.iter().map(|(name, menu)| (name.as_str(), menu)).collect())
            .unwrap_or_default()
    }

    /// Flushes to disk. If that fails the in-memory change is reverted, so
    /// memory never holds anything the file does not.
    fn save_or_undo(&mut self, undo: impl FnOnce(&mut Self)) -> Result<(), StoreError> {
        if let Err(why) = self.save() {
            warn!("reverting menu change, flush to {} failed: {why}", self.path.display());
            undo(self);
            return Err(why);
        }

        Ok(())
    }

    fn menu_mut(&mut self, server: &str, name: &str) -> Option<&mut Menu> {
        self.servers.get_mut(server)?.get_mut(name)
    }
}
