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

//! Ambient access to the provider of the surrounding scope.
//!
//! A provider is installed for the duration of a future (or closure) with
//! [`ThemeProvider::scope`] / [`ThemeProvider::sync_scope`]. Code running
//! inside reaches it through [`use_theme`] without having it passed down.
//! Scopes nest; the innermost provider wins.

use std::{future::Future, ops::Deref};

use snafu::OptionExt;

use crate::{
    err::{OutsideProviderSnafu, Result},
    provider::ThemeProvider,
};

tokio::task_local! {
    static CURRENT: ThemeProvider;
}

impl ThemeProvider {
    /// Runs `fut` with this provider installed as the ambient one.
    pub async fn scope<F: Future>(&self, fut: F) -> F::Output {
        CURRENT.scope(self.clone(), fut).await
    }

    /// Runs `f` with this provider installed as the ambient one.
    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R { CURRENT.sync_scope(self.clone(), f) }
}

/// What a consumer sees of the ambient provider.
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    provider: ThemeProvider,
}

impl ThemeHandle {
    pub fn provider(&self) -> &ThemeProvider { &self.provider }
}

impl Deref for ThemeHandle {
    type Target = ThemeProvider;

    fn deref(&self) -> &Self::Target { &self.provider }
}

/// The provider of the surrounding scope, or [`crate::Error::OutsideProvider`].
pub fn try_use_theme() -> Result<ThemeHandle> {
    CURRENT
        .try_with(|provider| ThemeHandle {
            provider: provider.clone(),
        })
        .ok()
        .context(OutsideProviderSnafu)
}

/// The provider of the surrounding scope.
///
/// # Panics
///
/// Panics when called outside any provider scope; that is a programming
/// error in the caller. Use [`try_use_theme`] to handle it instead.
pub fn use_theme() -> ThemeHandle {
    match try_use_theme() {
        Ok(handle) => handle,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use swatch_theme::{Preset, ThemeMode};

    use super::*;
    use crate::{Error, config::ProviderConfig, provider::ProviderOptions};

    fn mount(preset: Preset) -> ThemeProvider {
        ThemeProvider::mount(
            ProviderOptions::builder()
                .config(ProviderConfig::builder().initial_theme(preset.theme().clone()).build())
                .build(),
        )
    }

    #[test]
    fn sync_scope_exposes_provider() {
        let provider = mount(Preset::Default);
        provider.sync_scope(|| {
            let handle = use_theme();
            assert!(handle.toggle_mode());
        });
        assert_eq!(provider.theme().mode, ThemeMode::Dark);
    }

    #[test]
    fn outside_scope_is_an_error() {
        assert!(matches!(try_use_theme(), Err(Error::OutsideProvider { .. })));
    }

    #[test]
    #[should_panic(expected = "use_theme must be used within a ThemeProvider scope")]
    fn use_theme_panics_outside_scope() { let _ = use_theme(); }

    #[tokio::test]
    async fn nested_scopes_see_innermost_provider() {
        let outer = mount(Preset::Default);
        let inner = mount(Preset::Blue);

        outer
            .scope(async {
                assert_eq!(&use_theme().theme(), Preset::Default.theme());
                inner
                    .scope(async {
                        assert_eq!(&use_theme().theme(), Preset::Blue.theme());
                    })
                    .await;
                assert_eq!(&use_theme().theme(), Preset::Default.theme());
            })
            .await;
    }

    #[tokio::test]
    async fn independent_providers_do_not_collide() {
        let first = mount(Preset::Default);
        let second = mount(Preset::Default);
        first.scope(async { use_theme().toggle_mode() }).await;
        assert_eq!(first.theme().mode, ThemeMode::Dark);
        assert_eq!(second.theme().mode, ThemeMode::Light);
    }
}
