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

use std::{env, io::IsTerminal};

use bon::Builder;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, de};
use smart_default::SmartDefault;
use snafu::{ResultExt, Snafu};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_log::LogTracer;
use tracing_subscriber::{
    Layer, Registry,
    filter::{self, LevelFilter, Targets},
    fmt::MakeWriter,
    layer::SubscriberExt,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid log level {level:?}"))]
    InvalidLevel {
        level:  String,
        source: filter::ParseError,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Failed to open rolling log file in {dir}"))]
    RollingFile {
        dir:    String,
        source: tracing_appender::rolling::InitError,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("A global tracing subscriber is already installed"))]
    AlreadyInitialized {
        source: tracing::subscriber::SetGlobalDefaultError,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },
}

/// Deserializes a string value, using `Default::default()` if the string is
/// empty.
fn empty_string_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        Ok(T::default())
    } else {
        T::deserialize(de::value::StrDeserializer::new(&s)).map_err(|e: de::value::Error| {
            de::Error::custom(format!("invalid value, expect empty string, err: {e}"))
        })
    }
}

/// Fallback filter when neither `level` nor `RUST_LOG` is set.
const DEFAULT_LOG_TARGETS: &str = "info";

/// Configuration options for the logging system.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, SmartDefault, Builder)]
#[serde(default)]
pub struct LoggingOptions {
    /// Directory for hourly rotated log files. Empty means stdout only.
    #[default = ""]
    #[builder(default, into)]
    pub dir: String,

    /// Filter string such as `"info"` or `"debug,hyper=warn"`. Falls back to
    /// `RUST_LOG`, then `"info"`.
    #[builder(into)]
    pub level: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_default")]
    #[builder(default)]
    pub log_format: LogFormat,

    /// Rotated files kept per log stream (default: 720, i.e. 30 days).
    #[default = 720]
    #[builder(default = 720)]
    pub max_log_files: usize,

    /// Also write to stdout when file logging is enabled.
    #[default = true]
    #[builder(default = true)]
    pub append_stdout: bool,
}

/// Available log output formats.
#[derive(
    Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize, Default, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per event, with the current span and span list.
    Json,

    /// Human-readable text.
    #[default]
    Text,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer<W>(writer: W, format: LogFormat, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(writer)
        .with_ansi(ansi);
    match format {
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Text => layer.boxed(),
    }
}

fn rolling_appender(opts: &LoggingOptions, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::HOURLY)
        .filename_prefix(prefix)
        .max_log_files(opts.max_log_files)
        .build(&opts.dir)
        .context(RollingFileSnafu { dir: &opts.dir })
}

/// Stdout logging with default options.
pub fn init_tracing_subscriber(app_name: &str) -> Result<Vec<WorkerGuard>> {
    init_global_logging(app_name, &LoggingOptions::default())
}

/// Initialize logging for unit and integration tests.
///
/// Logs go to `UNITTEST_LOG_DIR` (default `/tmp/__unittest_logs`) at
/// `UNITTEST_LOG_LEVEL` (default debug, with noisy dependencies quieted).
/// Safe to call from every test; only the first call does anything.
pub fn init_default_ut_logging() {
    static GUARDS: OnceCell<Vec<WorkerGuard>> = OnceCell::new();

    GUARDS.get_or_init(|| {
        let dir =
            env::var("UNITTEST_LOG_DIR").unwrap_or_else(|_| "/tmp/__unittest_logs".to_string());
        let level = env::var("UNITTEST_LOG_LEVEL").unwrap_or_else(|_| {
            "debug,hyper=warn,hyper_util=warn,tower=warn,reqwest=warn,h2=info".to_string()
        });
        let opts = LoggingOptions::builder()
            .dir(dir.clone())
            .level(level)
            .append_stdout(false)
            .build();

        match init_global_logging("unittest", &opts) {
            Ok(guards) => {
                tracing::info!("logs dir = {}", dir);
                guards
            }
            Err(_) => Vec::new(),
        }
    });
}

/// Installs the global subscriber.
///
/// Sets up a stdout layer (if `append_stdout`), plus a main and an
/// error-only rolling file layer when `dir` is set. All writers are
/// non-blocking; the returned guards must be kept alive for as long as logs
/// should be flushed.
pub fn init_global_logging(app_name: &str, opts: &LoggingOptions) -> Result<Vec<WorkerGuard>> {
    let mut guards = vec![];
    let mut layers: Vec<BoxedLayer> = vec![];

    if opts.append_stdout {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);
        layers.push(fmt_layer(
            writer,
            opts.log_format,
            std::io::stdout().is_terminal(),
        ));
    }

    if !opts.dir.is_empty() {
        let (writer, guard) = tracing_appender::non_blocking(rolling_appender(opts, app_name)?);
        guards.push(guard);
        layers.push(fmt_layer(writer, opts.log_format, false));

        let (writer, guard) =
            tracing_appender::non_blocking(rolling_appender(opts, &format!("{app_name}-err"))?);
        guards.push(guard);
        layers.push(
            fmt_layer(writer, opts.log_format, false)
                .with_filter(LevelFilter::ERROR)
                .boxed(),
        );
    }

    let level = opts
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_TARGETS.to_string());
    let targets = level
        .parse::<Targets>()
        .context(InvalidLevelSnafu { level: &level })?;

    let subscriber = Registry::default().with(layers.with_filter(targets));
    tracing::subscriber::set_global_default(subscriber).context(AlreadyInitializedSnafu)?;
    // Route `log` records through tracing; a logger installed elsewhere wins.
    let _ = LogTracer::init();

    tracing::debug!(app_name, %level, format = %opts.log_format, "Logging initialized");
    Ok(guards)
}
