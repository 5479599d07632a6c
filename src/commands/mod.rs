pub mod cards;
pub mod menus;
pub mod utils;
