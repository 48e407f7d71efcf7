use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::{Handle, Runtime};

/// Spawns the background runtime on its own thread and starts the config
/// watcher on it. The returned handle is used to schedule further tasks
/// such as the autoplay timer.
pub fn start_background_services(
    config_path: PathBuf,
    tx: Sender<AppEvent>,
) -> std::io::Result<Handle> {
    let rt = Runtime::new()?;
    let handle = rt.handle().clone();

    thread::Builder::new()
        .name("roleta-services".into())
        .spawn(move || {
            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(config_path, tx).await;
                    });
                }

                std::future::pending::<()>().await;
            });
        })?;

    Ok(handle)
}
