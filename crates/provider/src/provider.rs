// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The stateful theme holder.
//!
//! Every change funnels through one commit step: resolve against the current
//! theme, validate, apply to the surface, persist, publish, then notify. A
//! rejected change leaves all of those untouched.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::{ReentrantMutex, RwLock};
use swatch_store::{FileKvStore, KvStore, KvStoreExt};
use swatch_theme::{Theme, ThemePatch, ThemeUpdate, default_theme, merge, parse_patch, validate};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    config::ProviderConfig,
    err::*,
    remote::RemoteThemeClient,
    surface::{StyleRoot, StyleSurface, apply_theme},
};

/// Invoked with the new theme after every successful change.
///
/// Runs while the commit lock is held, so callbacks observe changes in commit
/// order. A callback may change the theme again from the same thread; other
/// threads wait until it returns.
pub type ThemeChangeCallback = Arc<dyn Fn(&Theme) + Send + Sync>;

/// Everything [`ThemeProvider::mount`] needs.
#[derive(bon::Builder)]
pub struct ProviderOptions {
    #[builder(default)]
    config:          ProviderConfig,
    /// Used only when `config.enable_local_storage` is set. Falls back to a
    /// [`FileKvStore`] in the user config directory.
    storage:         Option<Arc<dyn KvStore>>,
    /// Defaults to a private [`StyleRoot`].
    surface:         Option<Arc<dyn StyleSurface>>,
    on_theme_change: Option<ThemeChangeCallback>,
}

/// How a call to [`ThemeProvider::load_theme_from_api`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LoadOutcome {
    /// The fetched theme was committed.
    Applied,
    /// A newer load started before this one finished; its result was dropped.
    Superseded,
    /// The provider was disposed while the load was in flight.
    Cancelled,
}

#[derive(Debug, Default)]
struct LoadStatus {
    generation: u64,
    last_error: Option<String>,
}

struct Inner {
    config:          ProviderConfig,
    storage:         Option<Arc<dyn KvStore>>,
    surface:         Arc<dyn StyleSurface>,
    on_theme_change: Option<ThemeChangeCallback>,
    client:          OnceCell<RemoteThemeClient>,
    theme:           watch::Sender<Theme>,
    in_flight:       watch::Sender<usize>,
    status:          RwLock<LoadStatus>,
    commit:          ReentrantMutex<()>,
    cancel:          CancellationToken,
}

/// Shared handle to one theme provider. Clones refer to the same state.
#[derive(Clone)]
pub struct ThemeProvider {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("mode", &self.inner.theme.borrow().mode)
            .field("is_loading", &self.is_loading())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl ThemeProvider {
    /// Restores the initial theme, applies it to the surface and, when an
    /// `api_url` is configured, starts loading the remote theme in the
    /// background.
    ///
    /// The background load needs a tokio runtime; without one it is skipped.
    pub fn mount(options: ProviderOptions) -> Self {
        let ProviderOptions {
            config,
            storage,
            surface,
            on_theme_change,
        } = options;

        let storage = config.enable_local_storage.then(|| {
            storage.unwrap_or_else(|| Arc::new(FileKvStore::default()) as Arc<dyn KvStore>)
        });
        let initial = restore(&config, storage.as_deref());
        let surface =
            surface.unwrap_or_else(|| Arc::new(StyleRoot::new()) as Arc<dyn StyleSurface>);
        apply_theme(surface.as_ref(), &initial);
        tracing::debug!(mode = %initial.mode, "Theme provider mounted");

        let provider = Self {
            inner: Arc::new(Inner {
                config,
                storage,
                surface,
                on_theme_change,
                client: OnceCell::new(),
                theme: watch::Sender::new(initial),
                in_flight: watch::Sender::new(0),
                status: RwLock::new(LoadStatus::default()),
                commit: ReentrantMutex::new(()),
                cancel: CancellationToken::new(),
            }),
        };

        if let Some(url) = provider.inner.config.api_url.clone() {
            provider.spawn_load(url);
        }
        provider
    }

    /// Snapshot of the current theme.
    pub fn theme(&self) -> Theme { self.inner.theme.borrow().clone() }

    /// Receives every committed theme, starting with the current one.
    pub fn subscribe(&self) -> watch::Receiver<Theme> { self.inner.theme.subscribe() }

    pub fn config(&self) -> &ProviderConfig { &self.inner.config }

    pub fn surface(&self) -> Arc<dyn StyleSurface> { Arc::clone(&self.inner.surface) }

    /// Whether any remote load is in flight.
    pub fn is_loading(&self) -> bool { *self.inner.in_flight.borrow() > 0 }

    /// Message of the most recent failed remote load, cleared when a new load
    /// starts.
    pub fn last_error(&self) -> Option<String> { self.inner.status.read().last_error.clone() }

    pub fn is_disposed(&self) -> bool { self.inner.cancel.is_cancelled() }

    /// Resolves once no remote load is in flight.
    pub async fn wait_idle(&self) {
        let mut in_flight = self.inner.in_flight.subscribe();
        let _ = in_flight.wait_for(|n| *n == 0).await;
    }

    /// Applies `update` on top of the current theme.
    ///
    /// Returns `false`, leaving everything untouched, when the result fails
    /// validation or the provider has been disposed.
    pub fn set_theme(&self, update: impl Into<ThemeUpdate>) -> bool {
        let update = update.into();
        self.commit(|current| update.resolve(current))
    }

    /// Replaces the theme with the built-in default preset.
    pub fn reset_theme(&self) -> bool { self.set_theme(default_theme()) }

    /// Flips light/dark, keeping every other token.
    pub fn toggle_mode(&self) -> bool {
        self.commit(|current| merge(current, &ThemePatch::from(current.mode.toggle())))
    }

    /// Fetches a theme from `url` and merges it onto the current one.
    ///
    /// Failures are recorded in [`Self::last_error`] and leave the theme
    /// unchanged. If another load starts before this one finishes, this
    /// result is dropped and [`LoadOutcome::Superseded`] returned.
    pub async fn load_theme_from_api(&self, url: &str) -> Result<LoadOutcome> {
        let guard = self.begin_load();
        self.run_load(url, guard).await
    }

    /// Cancels in-flight loads and ignores every later change.
    pub fn dispose(&self) {
        if !self.inner.cancel.is_cancelled() {
            tracing::debug!("Disposing theme provider");
            self.inner.cancel.cancel();
        }
    }

    fn commit(&self, resolve: impl FnOnce(&Theme) -> Theme) -> bool {
        let _commit = self.inner.commit.lock();
        if self.is_disposed() {
            tracing::debug!("Ignoring theme change on disposed provider");
            return false;
        }

        let current = self.inner.theme.borrow().clone();
        let updated = resolve(&current);
        if !validate(&updated) {
            return false;
        }

        apply_theme(self.inner.surface.as_ref(), &updated);
        self.persist(&updated);
        self.inner.theme.send_replace(updated.clone());

        tracing::debug!(mode = %updated.mode, "Theme committed");
        if let Some(on_theme_change) = &self.inner.on_theme_change {
            on_theme_change(&updated);
        }
        true
    }

    fn persist(&self, theme: &Theme) {
        let Some(storage) = &self.inner.storage else {
            return;
        };
        let key = &self.inner.config.storage_key;
        if let Err(err) = storage.set(key, theme) {
            tracing::warn!(%err, key, "Error saving theme to storage");
        }
    }

    fn begin_load(&self) -> LoadGuard {
        let mut status = self.inner.status.write();
        status.generation += 1;
        status.last_error = None;
        self.inner.in_flight.send_modify(|n| *n += 1);
        LoadGuard {
            inner:      Arc::clone(&self.inner),
            generation: status.generation,
        }
    }

    fn spawn_load(&self, url: String) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(url, "No tokio runtime available, skipping remote theme load");
            return;
        };
        let guard = self.begin_load();
        let provider = self.clone();
        runtime.spawn(async move {
            let _ = provider.run_load(&url, guard).await;
        });
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, guard),
        fields(generation = guard.generation)
    )]
    async fn run_load(&self, url: &str, guard: LoadGuard) -> Result<LoadOutcome> {
        let fetched = tokio::select! {
            () = self.inner.cancel.cancelled() => None,
            fetched = self.fetch_patch(url) => Some(fetched),
        };
        let Some(fetched) = fetched.filter(|_| !self.is_disposed()) else {
            tracing::debug!(url, "Remote theme load cancelled");
            return Ok(LoadOutcome::Cancelled);
        };
        if !guard.is_current() {
            tracing::debug!(url, "Discarding superseded remote theme");
            return Ok(LoadOutcome::Superseded);
        }

        let result = fetched.and_then(|patch| {
            snafu::ensure!(self.set_theme(patch), RejectedSnafu);
            Ok(LoadOutcome::Applied)
        });

        if let Err(err) = &result {
            let mut status = self.inner.status.write();
            if status.generation != guard.generation {
                return Ok(LoadOutcome::Superseded);
            }
            tracing::error!(%err, url, "Error loading theme from API");
            status.last_error = Some(err.to_string());
        }
        result
    }

    async fn fetch_patch(&self, url: &str) -> Result<ThemePatch> {
        let client = self
            .inner
            .client
            .get_or_try_init(|| RemoteThemeClient::from_config(&self.inner.config))?;
        client.fetch_patch(url).await
    }
}

/// Counts one in-flight load for as long as it lives.
struct LoadGuard {
    inner:      Arc<Inner>,
    generation: u64,
}

impl LoadGuard {
    fn is_current(&self) -> bool { self.inner.status.read().generation == self.generation }
}

impl Drop for LoadGuard {
    fn drop(&mut self) { self.inner.in_flight.send_modify(|n| *n -= 1); }
}

/// The theme a provider starts from: the stored theme merged onto the
/// configured initial theme, or the initial theme alone when nothing usable
/// is stored.
fn restore(config: &ProviderConfig, storage: Option<&dyn KvStore>) -> Theme {
    let initial = config.initial_theme.clone();
    let Some(storage) = storage else {
        return initial;
    };

    let key = config.storage_key.as_str();
    match storage.get_raw(key) {
        Ok(Some(stored)) if !stored.trim().is_empty() => match parse_patch(&stored) {
            Ok(patch) => merge(&initial, &patch),
            Err(err) => {
                tracing::warn!(%err, key, "Ignoring unusable stored theme");
                initial
            }
        },
        Ok(_) => initial,
        Err(err) => {
            tracing::warn!(%err, key, "Error loading theme from storage");
            initial
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use swatch_store::MemoryKvStore;
    use swatch_theme::{Preset, ThemeColorsPatch, ThemeMode};

    use super::*;

    fn colors(primary: &str) -> ThemeColorsPatch {
        ThemeColorsPatch {
            primary: Some(primary.into()),
            ..Default::default()
        }
    }

    fn initial(preset: Preset) -> ProviderConfig {
        ProviderConfig::builder().initial_theme(preset.theme().clone()).build()
    }

    fn persistent(storage: Arc<MemoryKvStore>) -> ProviderOptions {
        ProviderOptions::builder()
            .config(ProviderConfig::builder().enable_local_storage(true).build())
            .storage(storage)
            .build()
    }

    #[test]
    fn mounts_with_initial_theme_and_applies_it() {
        let root = Arc::new(StyleRoot::new());
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(initial(Preset::Dark))
                .surface(root.clone())
                .build(),
        );

        assert_eq!(&provider.theme(), Preset::Dark.theme());
        assert!(root.has_class("dark"));

        apply_theme(provider.surface().as_ref(), Preset::Blue.theme());
        assert!(root.has_class("light"));
        assert!(!root.has_class("dark"));
        assert!(!provider.is_loading());
        assert_eq!(provider.last_error(), None);
    }

    #[test]
    fn stored_theme_wins_field_by_field() {
        let storage = Arc::new(MemoryKvStore::new());
        storage
            .set_raw("app-theme", r#"{"mode":"dark","colors":{"primary":"0 0% 0%"}}"#)
            .unwrap();

        let provider = ThemeProvider::mount(persistent(storage));
        let theme = provider.theme();
        assert_eq!(theme.mode, ThemeMode::Dark);
        assert_eq!(theme.colors.primary, "0 0% 0%");
        assert_eq!(theme.colors.background, Preset::Default.theme().colors.background);
    }

    #[test]
    fn corrupted_storage_falls_back_to_initial() {
        for stored in ["{not json", r#"{"mode":"purple"}"#, r#"{"colors":{"primary":""}}"#, "[]"] {
            let storage = Arc::new(MemoryKvStore::new());
            storage.set_raw("app-theme", stored).unwrap();
            let provider = ThemeProvider::mount(persistent(storage));
            assert_eq!(&provider.theme(), Preset::Default.theme(), "{stored}");
        }
    }

    #[test]
    fn unparsable_storage_keeps_configured_initial_theme() {
        let storage = Arc::new(MemoryKvStore::new());
        storage.set_raw("app-theme", "{not json").unwrap();
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(
                    ProviderConfig::builder()
                        .initial_theme(Preset::Blue.theme().clone())
                        .enable_local_storage(true)
                        .build(),
                )
                .storage(storage)
                .build(),
        );

        assert_eq!(&provider.theme(), Preset::Blue.theme());
        assert_eq!(provider.config().storage_key, "app-theme");
    }

    #[test]
    fn storage_is_ignored_when_disabled() {
        let storage = Arc::new(MemoryKvStore::new());
        storage.set_raw("app-theme", r#"{"mode":"dark"}"#).unwrap();
        let provider =
            ThemeProvider::mount(ProviderOptions::builder().storage(storage.clone()).build());

        assert_eq!(provider.theme().mode, ThemeMode::Light);
        assert!(provider.toggle_mode());
        assert_eq!(storage.get_raw("app-theme").unwrap().as_deref(), Some(r#"{"mode":"dark"}"#));
    }

    #[test]
    fn set_theme_merges_persists_and_notifies() {
        let storage = Arc::new(MemoryKvStore::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(ProviderConfig::builder().enable_local_storage(true).build())
                .storage(storage.clone())
                .on_theme_change(Arc::new(move |theme: &Theme| {
                    assert_eq!(theme.colors.primary, "0 0% 0%");
                    seen.fetch_add(1, Ordering::SeqCst);
                }))
                .build(),
        );

        assert!(provider.set_theme(colors("0 0% 0%")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stored: Theme = storage.get("app-theme").unwrap().unwrap();
        assert_eq!(stored, provider.theme());
        assert_eq!(stored.colors.secondary, Preset::Default.theme().colors.secondary);
    }

    #[test]
    fn callback_may_change_theme_again() {
        let slot: Arc<OnceCell<ThemeProvider>> = Arc::new(OnceCell::new());
        let handle = slot.clone();
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .on_theme_change(Arc::new(move |theme: &Theme| {
                    if theme.mode == ThemeMode::Dark && theme.colors.primary != "0 0% 0%" {
                        let provider = handle.get().unwrap();
                        assert!(provider.set_theme(colors("0 0% 0%")));
                    }
                }))
                .build(),
        );
        slot.set(provider.clone()).unwrap();

        assert!(provider.toggle_mode());
        let theme = provider.theme();
        assert_eq!(theme.mode, ThemeMode::Dark);
        assert_eq!(theme.colors.primary, "0 0% 0%");
    }

    #[test]
    fn callbacks_follow_commit_order_across_threads() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let record = seen.clone();
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .on_theme_change(Arc::new(move |theme: &Theme| record.lock().push(theme.mode)))
                .build(),
        );

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..50 {
                        assert!(provider.toggle_mode());
                    }
                });
            }
        });

        let seen = seen.lock();
        assert_eq!(seen.len(), 200);
        for (i, mode) in seen.iter().enumerate() {
            let expected = if i % 2 == 0 { ThemeMode::Dark } else { ThemeMode::Light };
            assert_eq!(*mode, expected, "callback {i}");
        }
        assert_eq!(provider.theme().mode, ThemeMode::Light);
    }

    #[test]
    fn invalid_change_is_rejected_without_side_effects() {
        let storage = Arc::new(MemoryKvStore::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(ProviderConfig::builder().enable_local_storage(true).build())
                .storage(storage.clone())
                .on_theme_change(Arc::new(move |_: &Theme| {
                    seen.fetch_add(1, Ordering::SeqCst);
                }))
                .build(),
        );
        let mut changes = provider.subscribe();

        assert!(!provider.set_theme(colors("   ")));
        assert_eq!(&provider.theme(), Preset::Default.theme());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(storage.is_empty());
        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn reset_restores_default_preset() {
        let provider =
            ThemeProvider::mount(ProviderOptions::builder().config(initial(Preset::Blue)).build());
        assert!(provider.set_theme(colors("0 0% 0%")));
        assert!(provider.reset_theme());
        assert_eq!(&provider.theme(), Preset::Default.theme());
    }

    #[test]
    fn toggle_twice_round_trips() {
        let provider = ThemeProvider::mount(ProviderOptions::builder().build());
        let before = provider.theme();
        assert!(provider.toggle_mode());
        assert_eq!(provider.theme().mode, ThemeMode::Dark);
        assert_eq!(provider.theme().colors, before.colors);
        assert!(provider.toggle_mode());
        assert_eq!(provider.theme(), before);
    }

    #[test]
    fn changes_after_dispose_are_ignored() {
        let provider = ThemeProvider::mount(ProviderOptions::builder().build());
        provider.dispose();
        provider.dispose();
        assert!(provider.is_disposed());
        assert!(!provider.toggle_mode());
        assert_eq!(provider.theme().mode, ThemeMode::Light);
    }

    #[test]
    fn mount_without_runtime_skips_remote_load() {
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(ProviderConfig::builder().api_url("http://127.0.0.1:9/theme").build())
                .build(),
        );
        assert!(!provider.is_loading());
        assert_eq!(&provider.theme(), Preset::Default.theme());
    }
}
