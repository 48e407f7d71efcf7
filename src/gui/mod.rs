pub mod app;
pub mod deck;
pub mod theme;
pub mod view;

pub use app::{AppInit, AppModel, AppMsg};
pub use deck::{Card, Deck, Stage};
pub use view::draw;
