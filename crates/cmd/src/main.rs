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

use std::{path::PathBuf, sync::Arc};

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use snafu::{ResultExt, Whatever, whatever};
use strum::IntoEnumIterator;
use swatch_common_telemetry::{LogFormat, LoggingOptions, init_global_logging};
use swatch_provider::{ProviderConfig, ProviderOptions, StyleRoot, ThemeProvider, apply_theme};
use swatch_store::{FileKvStore, KvStore, StoreConfig};
use swatch_theme::{
    Preset, ThemeMode, ThemePatch, hex_to_hsl, merge, parse_patch, rgb_to_hsl, theme_variations,
};

#[derive(Debug, Parser)]
#[command(name = "swatch", about = "Runtime theme engine for design systems", version)]
struct Cli {
    /// Log filter, e.g. `info` or `debug,reqwest=warn`
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Text)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Presets(PresetsArgs),
    Css(CssArgs),
    Convert(ConvertArgs),
    Variations(VariationsArgs),
    Fetch(FetchArgs),
    Toggle(ToggleArgs),
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

List the built-in presets. Presets offered by the theme switcher are marked
with `*`.
Examples:

swatch presets

")]
struct PresetsArgs {}

impl PresetsArgs {
    fn run(&self) -> Result<(), Whatever> {
        for preset in Preset::iter() {
            let marker = if Preset::SWITCHER.contains(&preset) { '*' } else { ' ' };
            println!(
                "{marker} {:<16} {:<16} {}",
                preset.to_string(),
                preset.label(),
                preset.theme().mode
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Resolve a theme and print its CSS custom properties.
Examples:

swatch css --preset nordic-ice
swatch css --preset dark --patch overrides.json

")]
struct CssArgs {
    #[arg(long, default_value_t = Preset::Default)]
    preset: Preset,

    /// Force light or dark mode
    #[arg(long)]
    mode:  Option<ThemeMode>,

    /// JSON file with a partial theme merged onto the preset
    #[arg(long)]
    patch: Option<PathBuf>,
}

impl CssArgs {
    fn run(&self) -> Result<(), Whatever> {
        let mut theme = self.preset.theme().clone();
        if let Some(path) = &self.patch {
            let json = std::fs::read_to_string(path)
                .with_whatever_context(|_| format!("Failed to read {}", path.display()))?;
            let patch = parse_patch(&json)
                .with_whatever_context(|_| format!("Invalid theme in {}", path.display()))?;
            theme = merge(&theme, &patch);
        }
        if let Some(mode) = self.mode {
            theme = merge(&theme, &ThemePatch::from(mode));
        }

        let root = StyleRoot::new();
        apply_theme(&root, &theme);
        print!("{}", root.to_css());
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(group(ArgGroup::new("color").required(true).args(["hex", "rgb"])))]
#[command(long_about = r"

Convert a color to an HSL component string.
Examples:

swatch convert '#228b22'
swatch convert --rgb 255 0 128

")]
struct ConvertArgs {
    /// `#rrggbb` or `rrggbb`
    hex: Option<String>,

    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    rgb: Option<Vec<u8>>,
}

impl ConvertArgs {
    fn run(&self) -> Result<(), Whatever> {
        let hsl = match (&self.hex, self.rgb.as_deref()) {
            (Some(hex), _) => hex_to_hsl(hex).whatever_context("Failed to convert color")?,
            (None, Some(&[r, g, b])) => rgb_to_hsl(r, g, b),
            (None, _) => whatever!("Expected a hex color or --rgb R G B"),
        };
        println!("{hsl}");
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Print the color variations generated from a base color.
Examples:

swatch variations '221 83% 53%'

")]
struct VariationsArgs {
    color: String,
}

impl VariationsArgs {
    fn run(&self) -> Result<(), Whatever> {
        let variations = theme_variations(&self.color);
        let json = serde_json::to_string_pretty(&variations)
            .whatever_context("Failed to encode variations")?;
        println!("{json}");
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Load a theme from a remote endpoint and print the resulting CSS.
Examples:

swatch fetch https://example.com/api/theme

")]
struct FetchArgs {
    url: String,

    /// Theme the remote one is merged onto
    #[arg(long, default_value_t = Preset::Default)]
    preset: Preset,

    #[arg(long)]
    user_agent: Option<String>,
}

impl FetchArgs {
    async fn run(&self) -> Result<(), Whatever> {
        let root = Arc::new(StyleRoot::new());
        let config = ProviderConfig::builder()
            .initial_theme(self.preset.theme().clone())
            .api_url(self.url.clone())
            .maybe_user_agent(self.user_agent.clone())
            .build();
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(config)
                .surface(root.clone())
                .build(),
        );

        provider.wait_idle().await;
        if let Some(err) = provider.last_error() {
            whatever!("{err}");
        }
        print!("{}", root.to_css());
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Toggle between light and dark mode in the persisted theme.
Examples:

swatch toggle
swatch toggle --storage-dir ./themes --key docs-theme

")]
struct ToggleArgs {
    /// Defaults to the user config directory
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    #[arg(long, default_value = swatch_provider::DEFAULT_STORAGE_KEY)]
    key: String,
}

impl ToggleArgs {
    fn run(&self) -> Result<(), Whatever> {
        let store_config = StoreConfig::builder()
            .maybe_dir(self.storage_dir.clone())
            .build();
        let storage: Arc<dyn KvStore> = Arc::new(FileKvStore::from_config(&store_config));
        let provider = ThemeProvider::mount(
            ProviderOptions::builder()
                .config(
                    ProviderConfig::builder()
                        .enable_local_storage(true)
                        .storage_key(self.key.clone())
                        .build(),
                )
                .storage(storage)
                .build(),
        );

        if !provider.toggle_mode() {
            whatever!("Theme stored under {:?} could not be updated", self.key);
        }
        println!("{}", provider.theme().mode);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Whatever> {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    let logging = LoggingOptions::builder()
        .level(cli.log_level.clone())
        .log_format(cli.log_format.into())
        .build();
    let _guards =
        init_global_logging("swatch", &logging).whatever_context("Failed to initialize logging")?;
    tracing::debug!(command = ?cli.commands, "Running");

    match cli.commands {
        Commands::Presets(pa) => pa.run(),
        Commands::Css(ca) => ca.run(),
        Commands::Convert(ca) => ca.run(),
        Commands::Variations(va) => va.run(),
        Commands::Fetch(fa) => fa.run().await,
        Commands::Toggle(ta) => ta.run(),
    }
}
