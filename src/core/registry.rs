//! Output registry
//!
//! [`Log`] owns the named output configurations, the level registry and the
//! live sink set. Mutations are serialized by one lock; logging only takes a
//! short read lock to clone the current sink set.
//!
//! # Example
//!
//! ```
//! use log11::{DataFormat, Log, OutputConfig, Sink};
//!
//! let log = Log::builder().no_project_root().build();
//! log.add_output(
//!     OutputConfig::new("memory", Sink::stream(Vec::new()))
//!         .data_format(DataFormat::Json)
//!         .level("DEBUG"),
//! )?;
//!
//! let logger = log.logger();
//! logger.debug("ready");
//! # Ok::<(), log11::LoggerError>(())
//! ```

use super::dispatch::{InstalledSink, LiveOutput, SinkSet};
use super::error::{LoggerError, Result};
use super::log_level::{Level, LevelRegistry, LevelSpec, DEFAULT_LEVEL};
use super::log_record::LogRecord;
use super::logger::Logger;
use super::metrics::LoggerMetrics;
use super::output_config::OutputConfig;
use super::output_format::{DataFormat, RenderContext, TextFormatConfig};
use super::project_root;
use super::settings::LogSettings;
use super::sink::{SharedWriter, Sink};
use colored::Color;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Name of the output installed by [`Log::default_setup`]
pub const DEFAULT_OUTPUT: &str = "default";

static GLOBAL: Lazy<Log> = Lazy::new(Log::new);

#[derive(Default)]
struct RegistryState {
    outputs: Vec<OutputConfig>,
    global_level: Option<LevelSpec>,
}

impl RegistryState {
    fn position(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|config| config.name() == name)
    }
}

struct LogInner {
    state: Mutex<RegistryState>,
    levels: RwLock<LevelRegistry>,
    live: RwLock<Arc<SinkSet>>,
    console: Option<SharedWriter>,
    project_root: Option<PathBuf>,
    metrics: LoggerMetrics,
}

/// Registry of named outputs
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone)]
pub struct Log {
    inner: Arc<LogInner>,
}

impl Log {
    /// Create an empty registry, probing the project root from the working directory
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LogBuilder {
        LogBuilder::new()
    }

    /// The process-wide registry behind [`crate::get_logger`]
    pub fn global() -> &'static Log {
        &GLOBAL
    }

    /// Register an output
    ///
    /// Fails on an existing name unless the config asks to replace it. With
    /// `auto_apply` the live sinks are rebuilt immediately; if that rebuild
    /// fails the registry is restored and the previous sinks stay live.
    pub fn add_output(&self, config: OutputConfig) -> Result<()> {
        config.validate()?;
        let mut state = self.inner.state.lock();
        self.inner.levels.read().threshold(config.level_spec())?;

        let auto_apply = config.auto_applies();
        let previous = match state.position(config.name()) {
            Some(_) if !config.replaces() => {
                return Err(LoggerError::duplicate_output(config.name()));
            }
            Some(index) => Some((index, std::mem::replace(&mut state.outputs[index], config))),
            None => {
                state.outputs.push(config);
                None
            }
        };

        if auto_apply {
            if let Err(e) = self.rebuild(&state) {
                match previous {
                    Some((index, old)) => state.outputs[index] = old,
                    None => {
                        state.outputs.pop();
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove an output by name
    ///
    /// Re-applies when the removed output was configured with `auto_apply`.
    pub fn remove_output(&self, name: &str) -> Result<()> {
        let mut state = self.inner.state.lock();
        let index = state
            .position(name)
            .ok_or_else(|| LoggerError::unknown_output(name))?;
        let removed = state.outputs.remove(index);

        if removed.auto_applies() {
            if let Err(e) = self.rebuild(&state) {
                state.outputs.insert(index, removed);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove every output, tear down live sinks and drop the global level
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.outputs.clear();
        state.global_level = None;
        *self.inner.live.write() = Arc::new(SinkSet::default());
    }

    /// Reset to a single colored text output on stdout at INFO
    ///
    /// The default sink set replaces the live one in a single swap.
    pub fn default_setup(&self) -> Result<Logger> {
        let mut state = self.inner.state.lock();
        self.install_default(&mut state)?;
        Ok(self.logger())
    }

    /// Rebuild the live sinks from the registry
    ///
    /// An empty registry gets the default setup. Calling this again without
    /// changing the registry installs an identical sink set.
    pub fn apply(&self) -> Result<Logger> {
        let mut state = self.inner.state.lock();
        if state.outputs.is_empty() {
            self.install_default(&mut state)?;
        } else {
            self.rebuild(&state)?;
        }
        Ok(self.logger())
    }

    /// Logger handle, performing the default setup if no output is configured
    pub fn get_logger(&self) -> Logger {
        let mut state = self.inner.state.lock();
        if state.outputs.is_empty() {
            if let Err(e) = self.install_default(&mut state) {
                eprintln!("[LOGGER ERROR] Default setup failed: {}", e);
            }
        }
        drop(state);
        self.logger()
    }

    /// Logger handle without any setup
    pub fn logger(&self) -> Logger {
        Logger::new(self.clone())
    }

    /// Register a custom level and re-apply so the level column widens
    ///
    /// The level is only committed once the widened sink set is built.
    pub fn add_level(&self, name: &str, rank: u32, color: Color) -> Result<Level> {
        let state = self.inner.state.lock();
        let mut levels = self.inner.levels.read().clone();
        let level = levels.add_level(name, rank, color)?;

        let sinks = if state.outputs.is_empty() {
            None
        } else {
            Some(self.build_sinks(&state, &levels)?)
        };
        *self.inner.levels.write() = levels;
        if let Some(sinks) = sinks {
            self.install(sinks);
        }
        Ok(level)
    }

    /// Override every output's level until cleared
    ///
    /// Per-output levels are kept and come back after
    /// [`Log::clear_global_level`] or [`Log::clear`].
    pub fn set_global_level(&self, level: impl Into<LevelSpec>) -> Result<()> {
        let level = level.into();
        let mut state = self.inner.state.lock();
        self.inner.levels.read().threshold(&level)?;

        let previous = state.global_level.replace(level);
        if let Err(e) = self.rebuild(&state) {
            state.global_level = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn clear_global_level(&self) -> Result<()> {
        let mut state = self.inner.state.lock();
        let Some(previous) = state.global_level.take() else {
            return Ok(());
        };
        if let Err(e) = self.rebuild(&state) {
            state.global_level = Some(previous);
            return Err(e);
        }
        Ok(())
    }

    pub fn global_level(&self) -> Option<LevelSpec> {
        self.inner.state.lock().global_level.clone()
    }

    /// Apply declarative settings on top of the current registry
    ///
    /// Every output is validated before anything is registered.
    pub fn apply_settings(&self, settings: &LogSettings) -> Result<Logger> {
        let outputs = settings
            .outputs
            .iter()
            .map(|output| output.to_config().map(|config| config.auto_apply(false)))
            .collect::<Result<Vec<_>>>()?;
        for config in &outputs {
            config.validate()?;
        }

        for level in &settings.levels {
            let color = level.color()?;
            let existing = self.inner.levels.read().resolve(&level.name).ok();
            match existing {
                Some(found) if found.rank() == level.rank && found.color() == color => {}
                _ => {
                    self.add_level(&level.name, level.rank, color)?;
                }
            }
        }
        for config in outputs {
            self.add_output(config)?;
        }
        if let Some(level) = &settings.level {
            self.set_global_level(level.clone())?;
        }
        self.apply()
    }

    /// Configured output names in insertion order
    pub fn outputs(&self) -> Vec<String> {
        self.inner
            .state
            .lock()
            .outputs
            .iter()
            .map(|config| config.name().to_string())
            .collect()
    }

    pub fn output(&self, name: &str) -> Option<OutputConfig> {
        let state = self.inner.state.lock();
        state.position(name).map(|index| state.outputs[index].clone())
    }

    /// The sinks currently installed
    pub fn live_outputs(&self) -> Vec<LiveOutput> {
        self.inner.live.read().snapshot()
    }

    pub fn levels(&self) -> Vec<Level> {
        self.inner.levels.read().iter().cloned().collect()
    }

    pub fn resolve_level(&self, name: &str) -> Result<Level> {
        self.inner.levels.read().resolve(name)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Deliver a record to the live sinks
    pub fn dispatch(&self, record: &LogRecord) {
        self.inner.metrics.record_record();
        let sinks = self.inner.live.read().clone();
        if !sinks.is_empty() {
            sinks.dispatch(record, &self.inner.metrics);
        }
    }

    pub fn flush(&self) -> Result<()> {
        let sinks = self.inner.live.read().clone();
        sinks.flush()
    }

    /// Replace the registry contents with the default output
    ///
    /// On failure the previous outputs and global level are restored.
    fn install_default(&self, state: &mut RegistryState) -> Result<()> {
        let config = OutputConfig::new(DEFAULT_OUTPUT, Sink::Stdout)
            .data_format(DataFormat::Text)
            .colored(true)
            .level(DEFAULT_LEVEL)
            .text_format_config(TextFormatConfig::default());

        let previous_outputs = std::mem::replace(&mut state.outputs, vec![config]);
        let previous_level = state.global_level.take();
        if let Err(e) = self.rebuild(state) {
            state.outputs = previous_outputs;
            state.global_level = previous_level;
            return Err(e);
        }
        Ok(())
    }

    /// Build a complete sink set from `state` and swap it in
    ///
    /// Nothing is swapped if any sink fails to open.
    fn rebuild(&self, state: &RegistryState) -> Result<()> {
        let sinks = {
            let levels = self.inner.levels.read();
            self.build_sinks(state, &levels)?
        };
        self.install(sinks);
        Ok(())
    }

    fn build_sinks(&self, state: &RegistryState, levels: &LevelRegistry) -> Result<SinkSet> {
        let context = RenderContext {
            level_width: levels.max_name_width(),
            project_root: self.inner.project_root.clone(),
        };
        let global = match &state.global_level {
            Some(spec) => Some(levels.threshold(spec)?),
            None => None,
        };

        let mut sinks = Vec::with_capacity(state.outputs.len());
        for config in &state.outputs {
            let threshold = match global {
                Some(rank) => rank,
                None => levels.threshold(config.level_spec())?,
            };
            sinks.push(InstalledSink::open(
                config,
                threshold,
                &context,
                self.inner.console.as_ref(),
            )?);
        }
        Ok(SinkSet::new(sinks))
    }

    fn install(&self, sinks: SinkSet) {
        let previous = std::mem::replace(&mut *self.inner.live.write(), Arc::new(sinks));
        drop(previous);
        self.inner.metrics.record_rebuild();
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}

enum RootChoice {
    Detect,
    Fixed(Option<PathBuf>),
}

/// Builder for constructing a [`Log`] at the composition root
pub struct LogBuilder {
    console: Option<SharedWriter>,
    project_root: RootChoice,
    levels: LevelRegistry,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self {
            console: None,
            project_root: RootChoice::Detect,
            levels: LevelRegistry::new(),
        }
    }

    /// Send stdout sinks to `writer` instead of the process stdout
    #[must_use = "builder methods return a new value"]
    pub fn console<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.console = Some(Arc::new(Mutex::new(Box::new(writer))));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_shared(mut self, writer: SharedWriter) -> Self {
        self.console = Some(writer);
        self
    }

    /// Use `root` for relative locations instead of probing
    #[must_use = "builder methods return a new value"]
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = RootChoice::Fixed(Some(root.into()));
        self
    }

    /// Keep locations exactly as the call site reports them
    #[must_use = "builder methods return a new value"]
    pub fn no_project_root(mut self) -> Self {
        self.project_root = RootChoice::Fixed(None);
        self
    }

    /// Register a custom level up front
    pub fn level(mut self, name: &str, rank: u32, color: Color) -> Result<Self> {
        self.levels.add_level(name, rank, color)?;
        Ok(self)
    }

    pub fn build(self) -> Log {
        let project_root = match self.project_root {
            RootChoice::Detect => project_root::detect(),
            RootChoice::Fixed(root) => root,
        };

        Log {
            inner: Arc::new(LogInner {
                state: Mutex::new(RegistryState::default()),
                levels: RwLock::new(self.levels),
                live: RwLock::new(Arc::new(SinkSet::default())),
                console: self.console,
                project_root,
                metrics: LoggerMetrics::new(),
            }),
        }
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
