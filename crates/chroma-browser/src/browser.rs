//! Browser lifecycle management and process control.
//!
//! This module provides `ChromeBrowser`, the entry point for a browser
//! session. It either launches a local Chrome process or attaches to an
//! already-running one through its DevTools websocket, and hands out pages.
//!
//! # Resource Safety
//!
//! `ChromeBrowser` relies on chromiumoxide's Drop to kill a launched process
//! if the value is dropped without `close()`. Explicit `close()` is still the
//! expected path; Drop only logs when it has to step in.
//!
//! A launched browser gets a throwaway profile directory that lives exactly as
//! long as the `ChromeBrowser`, so a long-running server does not accumulate
//! one directory per analysis.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use crate::wait::WaitConfig;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Settings for launching or attaching to a browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserSettings {
    /// Run in headless mode (default: true). Ignored when attaching.
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Pass `--no-sandbox` to Chrome (default: false).
    ///
    /// Only needed where user namespaces are unavailable, typically inside
    /// containers. Without the sandbox a compromised renderer runs with the
    /// full rights of this process, so never enable it for a service that
    /// loads pages chosen by untrusted clients unless the container itself is
    /// the isolation boundary.
    pub no_sandbox: bool,

    /// Chrome executable path (None = auto-detect).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<String>,

    /// DevTools websocket URL of a running browser. When set, no local
    /// process is launched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,

    /// How long to wait for `document.readyState == "complete"` after navigation.
    pub load_timeout_ms: u64,
}

impl BrowserSettings {
    /// Creates settings with defaults for headless use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Disables Chrome's sandbox. See [`BrowserSettings::no_sandbox`].
    #[must_use]
    pub fn without_sandbox(mut self) -> Self {
        self.no_sandbox = true;
        self
    }

    /// Attaches to a remote browser instead of launching one.
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// Wait strategy used after each navigation.
    #[must_use]
    pub fn load_wait(&self) -> WaitConfig {
        WaitConfig::with_timeout(Duration::from_millis(self.load_timeout_ms))
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self, user_data_dir: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless && !cfg!(feature = "visible") {
            config = config.arg("--headless");
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        if self.no_sandbox {
            config = config.arg("--no-sandbox");
        }

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            no_sandbox: false,
            chrome_path: None,
            remote_url: None,
            load_timeout_ms: 30_000,
        }
    }
}

/// How the browser behind a [`ChromeBrowser`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserOrigin {
    /// A Chrome process spawned by us; closing kills it.
    Launched,
    /// A browser someone else runs; closing only drops our connection.
    Attached,
}

/// A managed browser instance.
///
/// Each analysis owns exactly one `ChromeBrowser`; instances are never shared
/// between concurrent requests.
///
/// ```ignore
/// let browser = ChromeBrowser::launch(BrowserSettings::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("https://example.com").await?;
/// browser.close().await?;
/// ```
pub struct ChromeBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    origin: BrowserOrigin,
    settings: BrowserSettings,
    // Declared after `inner` so the process is killed before the directory
    // is removed when dropped without `close()`.
    profile_dir: Option<TempDir>,
}

impl ChromeBrowser {
    /// Launches a local browser, or attaches to `settings.remote_url` when set.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed or fails to start,
    /// and `ConnectionFailed` if the remote endpoint cannot be reached.
    pub async fn launch(settings: BrowserSettings) -> Result<Self> {
        let (browser, mut handler, origin, profile_dir) = match &settings.remote_url {
            Some(url) => {
                debug!("Attaching to remote browser at {}", url);
                let (browser, handler) = Browser::connect(url.clone())
                    .await
                    .map_err(|e| BrowserError::ConnectionFailed(format!("{url}: {e}")))?;
                (browser, handler, BrowserOrigin::Attached, None)
            }
            None => {
                debug!("Launching browser with settings: {:?}", settings);
                // A fresh profile per launch keeps concurrent analyses from
                // fighting over Chrome's ProcessSingleton lock.
                let profile_dir = tempfile::Builder::new()
                    .prefix("chroma-")
                    .tempdir()
                    .map_err(|e| BrowserError::LaunchFailed {
                        reason: "failed to create profile directory".to_string(),
                        source: Some(Box::new(e)),
                    })?;
                let config = settings.to_browser_config(profile_dir.path())?;
                let (browser, handler) = Browser::launch(config)
                    .await
                    .map_err(|e| BrowserError::LaunchFailed {
                        reason: "failed to launch Chrome process".to_string(),
                        source: Some(Box::new(e)),
                    })?;
                (browser, handler, BrowserOrigin::Launched, Some(profile_dir))
            }
        };

        // chromiumoxide only processes CDP events while the handler is polled
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser ready ({:?})", origin);

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            origin,
            settings,
            profile_dir,
        })
    }

    /// Returns whether this browser was launched or attached.
    #[must_use]
    pub fn origin(&self) -> BrowserOrigin {
        self.origin
    }

    /// Profile directory of a launched browser. `None` when attached.
    #[must_use]
    pub fn profile_dir(&self) -> Option<&Path> {
        self.profile_dir.as_ref().map(TempDir::path)
    }

    /// Creates a new browser page (tab).
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;
        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(chrome_page, self.settings.load_wait()))
    }

    /// Closes the browser.
    ///
    /// A launched process is asked to exit and then reaped, and its profile
    /// directory is removed. An attached browser is left running; only our
    /// connection is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(mut self) -> Result<()> {
        let browser = self.inner.lock().await.take();

        if let Some(mut browser) = browser {
            if self.origin == BrowserOrigin::Launched {
                debug!("Closing browser gracefully");
                browser
                    .close()
                    .await
                    .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
                if let Err(e) = browser.wait().await {
                    warn!("Browser process did not exit cleanly: {}", e);
                }
            } else {
                debug!("Detaching from remote browser");
            }
        }

        if let Some(dir) = self.profile_dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("Failed to remove browser profile {}: {}", path.display(), e);
            }
        }

        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for ChromeBrowser {
    fn drop(&mut self) {
        // chromiumoxide's own Drop kills a launched process that is still held here
        let still_open = self
            .inner
            .try_lock()
            .map(|guard| guard.is_some())
            .unwrap_or(true);
        if still_open {
            warn!("ChromeBrowser dropped without explicit close() - forcing shutdown via Drop");
        }
    }
}
