use crate::carousel::{LayoutKind, Thresholds};
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CardLabel(String);

impl CardLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Accent color written as `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct CardColor(pub Srgb<u8>);

impl FromStr for CardColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl CardColor {
    pub fn to_f64(&self) -> Srgb<f64> {
        self.0.into_format()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CardConfig {
    pub label: CardLabel,
    pub image: Option<PathBuf>,
    pub color: Option<CardColor>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct InputConfig {
    pub mouse_threshold: Option<f64>,
    pub touch_threshold: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutKind,
    pub initial_center: Option<usize>,
    pub autoplay_ms: Option<u64>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

impl Config {
    /// Swipe thresholds, falling back to the layout's presets.
    pub fn thresholds(&self) -> Thresholds {
        let (mouse, touch) = self.layout.default_thresholds();
        Thresholds::new(
            self.input.mouse_threshold.unwrap_or(mouse),
            self.input.touch_threshold.unwrap_or(touch),
        )
    }

    pub fn initial_center(&self) -> usize {
        let len = self.cards.len();
        self.initial_center
            .map(|c| c.min(len.saturating_sub(1)))
            .unwrap_or_else(|| self.layout.initial_center(len))
    }

    /// `None` when autoplay is off (unset or zero).
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a file path: {}", .0.display())]
    NotAFile(PathBuf),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "roleta", "roleta").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("ROLETA"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn default_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Reads `path`, or the built-in deck when the file does not exist.
pub fn reload(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        default_config()
    }
}

/// Like [`reload`], but falls back to the built-in deck on any error.
pub fn load_or_default(path: &Path) -> Config {
    match reload(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            default_config().unwrap_or_default()
        }
    }
}

pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

/// The config file as the watcher sees it: absolute, inside a directory that exists.
#[derive(Debug, Clone, PartialEq)]
struct WatchTarget {
    file: PathBuf,
    dir: PathBuf,
    canonical_dir: PathBuf,
}

impl WatchTarget {
    /// Resolves a possibly relative `path` against the working directory and
    /// creates its parent so there is something to watch.
    fn new(path: &Path) -> Result<Self, ConfigError> {
        let file = std::path::absolute(path)?;
        let dir = match file.parent() {
            Some(dir) if file.file_name().is_some() => dir.to_path_buf(),
            _ => return Err(ConfigError::NotAFile(file)),
        };
        fs_err::create_dir_all(&dir)?;
        let canonical_dir = fs_err::canonicalize(&dir)?;
        Ok(Self {
            file,
            dir,
            canonical_dir,
        })
    }

    /// Whether a path reported by notify names the config file.
    fn matches(&self, path: &Path) -> bool {
        if path == self.file {
            return true;
        }
        path.file_name() == self.file.file_name()
            && path
                .parent()
                .and_then(|dir| dir.canonicalize().ok())
                .is_some_and(|dir| dir == self.canonical_dir)
    }
}

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let target = match WatchTarget::new(&config_path) {
        Ok(target) => target,
        Err(e) => {
            log::error!("Cannot watch {}: {}", config_path.display(), e);
            return;
        }
    };

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&target.dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", target.dir.display(), e);
        return;
    }
    log::debug!("Watching {}", target.file.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_file = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| target.matches(p));

                if touches_file && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_builtin_config_is_valid() {
        let config = default_config().unwrap();
        assert!(!config.cards.is_empty());
        assert_eq!(config.autoplay_interval(), None);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = parse("");
        assert_eq!(config.layout, LayoutKind::Responsive);
        assert!(config.cards.is_empty());
        assert_eq!(config.initial_center(), 0);
        assert_eq!(config.thresholds(), Thresholds::new(30.0, 30.0));
    }

    #[test]
    fn test_static_presets() {
        let config = parse(
            r#"
            layout = "static"

            [[cards]]
            label = "One"

            [[cards]]
            label = "Two"

            [[cards]]
            label = "Three"
            "#,
        );
        assert_eq!(config.layout, LayoutKind::Static);
        assert_eq!(config.initial_center(), 0);
        assert_eq!(config.thresholds(), Thresholds::new(50.0, 40.0));
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r##"
            layout = "responsive"
            initial_center = 7
            autoplay_ms = 5000

            [input]
            touch_threshold = 25.0

            [[cards]]
            label = "Design"
            image = "/tmp/design.png"
            color = "#3a6ea5"

            [[cards]]
            label = "Code"
            "##,
        );
        assert_eq!(config.initial_center(), 1);
        assert_eq!(config.thresholds(), Thresholds::new(30.0, 25.0));
        assert_eq!(config.autoplay_interval(), Some(Duration::from_millis(5000)));
        assert_eq!(config.cards[0].label, CardLabel::new("Design"));
        assert_eq!(config.cards[0].image, Some(PathBuf::from("/tmp/design.png")));
        assert_eq!(
            config.cards[0].color,
            Some(CardColor(Srgb::new(0x3a, 0x6e, 0xa5)))
        );
        assert_eq!(config.cards[1].color, None);
    }

    #[test]
    fn test_write_then_reload() {
        let dir = std::env::temp_dir().join(format!("roleta-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        assert_eq!(reload(&path).unwrap(), default_config().unwrap());

        write_default_config(&path).unwrap();
        assert!(path.exists());
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.cards.len(), 5);
        assert_eq!(loaded.cards[0].label, CardLabel::new("Branding"));

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_zero_autoplay_is_disabled() {
        assert_eq!(parse("autoplay_ms = 0").autoplay_interval(), None);
    }

    #[test]
    fn test_card_color_serde() {
        let cases = vec![
            ("\"#3a6ea5\"", Srgb::new(0x3a, 0x6e, 0xa5)),
            ("\"3A6EA5\"", Srgb::new(0x3a, 0x6e, 0xa5)),
            ("\"#fff\"", Srgb::new(0xff, 0xff, 0xff)),
        ];

        for (json, expected) in cases {
            let color: CardColor = serde_json::from_str(json).unwrap();
            assert_eq!(color, CardColor(expected));
        }

        let json = serde_json::to_string(&CardColor(Srgb::new(1, 2, 255))).unwrap();
        assert_eq!(json, "\"#0102ff\"");
        assert!(serde_json::from_str::<CardColor>("\"not-a-color\"").is_err());
    }

    #[test]
    fn test_watch_target_resolves_relative_path() {
        let cwd = std::env::current_dir().unwrap();
        let target = WatchTarget::new(Path::new("roleta-deck.toml")).unwrap();
        assert_eq!(target.file, cwd.join("roleta-deck.toml"));
        assert_eq!(target.dir, cwd);
        assert!(target.matches(&cwd.join("roleta-deck.toml")));
        assert!(!target.matches(&cwd.join("other.toml")));

        let dotted = WatchTarget::new(Path::new("./roleta-deck.toml")).unwrap();
        assert!(dotted.matches(&cwd.join("roleta-deck.toml")));
    }

    #[test]
    fn test_watch_target_rejects_root() {
        assert!(matches!(
            WatchTarget::new(Path::new("/")),
            Err(ConfigError::NotAFile(_))
        ));
    }

    #[tokio::test]
    async fn test_watcher_reloads_relative_config_path() {
        let dir = PathBuf::from("target").join(format!("roleta-watch-{}", std::process::id()));
        let path = dir.join("deck.toml");
        assert!(path.is_relative());
        fs_err::create_dir_all(&dir).unwrap();

        let (tx, rx) = async_channel::unbounded();
        let watcher = tokio::spawn(run_async_watcher(path.clone(), tx));
        // give the watcher time to register before touching the file
        tokio::time::sleep(Duration::from_millis(300)).await;
        fs_err::write(&path, "layout = \"static\"\n").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        watcher.abort();
        fs_err::remove_dir_all(&dir).unwrap();
        assert_eq!(event.unwrap().unwrap(), AppEvent::ConfigReload);
    }
}
