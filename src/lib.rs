pub mod commands;
pub mod config;
pub mod reactions;
pub mod store;

use tokio::sync::Mutex;

pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    pub menus: Mutex<store::MenuStore>,
}

impl Data {
    pub fn new(menus: store::MenuStore) -> Self {
        Self {
            menus: Mutex::new(menus),
        }
    }
}
