use crate::carousel::{Carousel, LayoutKind, Scene, Viewport};
use crate::config::{CardColor, CardConfig, CardLabel, Config};
use gdk_pixbuf::Pixbuf;
use std::path::Path;

pub const IMAGE_SIZE: i32 = 512;

pub type Stage = Carousel<LayoutKind, Scene>;

#[derive(Clone)]
pub struct Card {
    pub label: CardLabel,
    pub pixbuf: Option<Pixbuf>,
    pub color: Option<CardColor>,
}

impl Card {
    pub fn from_config(cfg: &CardConfig) -> Self {
        Self {
            label: cfg.label.clone(),
            pixbuf: cfg.image.as_deref().and_then(Self::load_image),
            color: cfg.color,
        }
    }

    fn load_image(path: &Path) -> Option<Pixbuf> {
        Pixbuf::from_file_at_scale(path, IMAGE_SIZE, IMAGE_SIZE, true)
            .inspect_err(|e| log::warn!("Failed to load card image {}: {}", path.display(), e))
            .ok()
    }
}

/// Cards from the config plus the carousel arranging them. The carousel is
/// absent while there are no cards.
pub struct Deck {
    pub cards: Vec<Card>,
    pub carousel: Option<Stage>,
    viewport: Viewport,
}

impl Deck {
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        let cards: Vec<Card> = config.cards.iter().map(Card::from_config).collect();
        let carousel = Carousel::new(
            config.layout,
            Scene::default(),
            cards.len(),
            config.initial_center(),
            viewport,
        );
        Self {
            cards,
            carousel,
            viewport,
        }
    }

    /// Returns whether the visible geometry changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.carousel
            .as_mut()
            .is_some_and(|carousel| carousel.resize(viewport))
    }

    /// Replaces the cards and layout, keeping the current center when possible.
    pub fn reload(&mut self, config: &Config) {
        self.cards = config.cards.iter().map(Card::from_config).collect();
        let len = self.cards.len();

        if len == 0 {
            if self.carousel.take().is_some() {
                log::warn!("Config has no cards, carousel disabled");
            }
        } else if let Some(carousel) = self.carousel.as_mut() {
            carousel.set_len(len);
            carousel.set_layout(config.layout);
        } else {
            self.carousel = Carousel::new(
                config.layout,
                Scene::default(),
                len,
                config.initial_center(),
                self.viewport,
            );
        }
    }

    /// Runs `f` on the carousel if there is one.
    pub fn with_carousel(&mut self, f: impl FnOnce(&mut Stage)) -> bool {
        match self.carousel.as_mut() {
            Some(carousel) => {
                f(carousel);
                true
            }
            None => false,
        }
    }
}
