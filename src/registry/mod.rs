// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-tag enablement, default level and sink override on top of a [`Logger`].

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use crate::Error;
use crate::Logger;
use crate::Sink;
use crate::logger::default_logger;
use crate::logger::write_error_chain;
use crate::record::CallStack;
use crate::record::Level;

mod directive;

pub use self::directive::Directive;
pub use self::directive::Directives;

/// The tag used by the tagless [`TagRegistry::log`] calls.
pub const LIBRARY_TAG: &str = "tagforth";

static DEFAULT_REGISTRY: OnceLock<TagRegistry> = OnceLock::new();

/// Return the process-wide registry, bound to [`default_logger`].
pub fn default_registry() -> &'static TagRegistry {
    DEFAULT_REGISTRY.get_or_init(|| TagRegistry::new(default_logger().clone()))
}

/// The configuration of a single tag.
///
/// Records are created on first reference to a tag and live as long as their registry.
#[derive(Debug)]
pub struct TagConfig {
    enabled: AtomicBool,
    level: AtomicI32,
    sink: RwLock<Option<Arc<dyn Sink>>>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            level: AtomicI32::new(Level::INFO.raw()),
            sink: RwLock::new(None),
        }
    }
}

impl TagConfig {
    /// Whether calls for this tag produce output.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// The level of calls that do not name one.
    pub fn level(&self) -> Level {
        Level::from_raw(self.level.load(Ordering::Relaxed))
    }

    /// The sink override, if any.
    pub fn sink(&self) -> Option<Arc<dyn Sink>> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    fn set_level(&self, level: Level) {
        self.level.store(level.raw(), Ordering::Relaxed);
    }

    fn set_sink(&self, sink: Option<Arc<dyn Sink>>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }
}

/// A registry of tag configurations sharing one [`Logger`].
///
/// Tags are created lazily and implicitly by any call that names them. A tag without a sink
/// override writes to the logger's current sink.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tagforth::Level;
/// use tagforth::Logger;
/// use tagforth::TagRegistry;
/// use tagforth::sink::Testing;
///
/// let logger = Arc::new(Logger::builder().sink(Testing::default()).build());
/// let registry = TagRegistry::new(logger);
///
/// registry.set_log_level("net", Level::DEBUG);
/// registry.set_log_enable("db", false);
///
/// registry.out("net", format_args!("connected to {}", "10.0.0.1"));
/// registry.out("db", format_args!("never printed"));
/// ```
#[derive(Debug)]
pub struct TagRegistry {
    logger: Arc<Logger>,
    tags: Mutex<HashMap<String, Arc<TagConfig>>>,
}

impl TagRegistry {
    /// Create an empty registry writing through `logger`.
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            tags: Mutex::new(HashMap::new()),
        }
    }

    /// The logger providing the default sink.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Return the configuration of `tag`, creating it on first reference.
    pub fn tag(&self, tag: &str) -> Arc<TagConfig> {
        let mut tags = self.tags.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = tags.get(tag) {
            return config.clone();
        }
        let config = Arc::new(TagConfig::default());
        tags.insert(tag.to_owned(), config.clone());
        config
    }

    /// The number of known tags.
    pub fn len(&self) -> usize {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no tag has been referenced yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the default sink of every tag without an override.
    ///
    /// # Errors
    ///
    /// Return an error if `sink` is `None`; the default sink cannot be removed.
    pub fn set_logger(&self, sink: Option<Arc<dyn Sink>>) -> Result<(), Error> {
        let sink = sink.ok_or_else(|| Error::new("default sink must not be empty"))?;
        self.logger.set_logger(Some(sink));
        Ok(())
    }

    /// Set the sink override of `tag`; `None` restores the default sink.
    pub fn set_tag_logger(&self, tag: &str, sink: Option<Arc<dyn Sink>>) {
        self.tag(tag).set_sink(sink);
    }

    /// Set the level used by [`out`](TagRegistry::out) for `tag`.
    pub fn set_log_level(&self, tag: &str, level: Level) {
        self.tag(tag).set_level(level);
    }

    /// Enable or disable every output of `tag`.
    pub fn set_log_enable(&self, tag: &str, enabled: bool) {
        self.tag(tag).set_enabled(enabled);
    }

    /// Apply parsed [`Directives`] in order.
    pub fn apply_directives(&self, directives: &Directives) {
        for (tag, directive) in directives.iter() {
            match *directive {
                Directive::Enable(enabled) => self.set_log_enable(tag, enabled),
                Directive::Level(level) => self.set_log_level(tag, level),
            }
        }
    }

    /// Write a message at the configured level of `tag`.
    ///
    /// Nothing is formatted when the tag is disabled.
    #[track_caller]
    pub fn out(&self, tag: &str, args: fmt::Arguments<'_>) {
        let config = self.tag(tag);
        if !config.is_enabled() {
            return;
        }
        self.emit(&config, config.level(), tag, args, CallStack::capture());
    }

    /// Write a message at an explicit level, ignoring the configured one.
    #[track_caller]
    pub fn out_with_level(&self, tag: &str, level: Level, args: fmt::Arguments<'_>) {
        let config = self.tag(tag);
        if !config.is_enabled() {
            return;
        }
        self.emit(&config, level, tag, args, CallStack::capture());
    }

    /// Write a message at the configured level of `tag` with caller frames collected by a
    /// wrapper.
    ///
    /// See [`Logger::out_with_stack`].
    pub fn out_with_stack(&self, tag: &str, stack: CallStack, args: fmt::Arguments<'_>) {
        let config = self.tag(tag);
        if !config.is_enabled() {
            return;
        }
        self.emit(&config, config.level(), tag, args, stack);
    }

    /// Print `err` and its chain of sources to standard error, unless `tag` is disabled.
    ///
    /// Sinks are not involved.
    pub fn out_error<E>(&self, tag: &str, err: &E)
    where
        E: std::error::Error + ?Sized,
    {
        if !self.tag(tag).is_enabled() {
            return;
        }
        let _ = write_error_chain(&mut io::stderr().lock(), tag, err);
    }

    /// Write a message under [`LIBRARY_TAG`].
    #[deprecated(note = "name a tag and use `TagRegistry::out` instead")]
    #[track_caller]
    pub fn log(&self, args: fmt::Arguments<'_>) {
        self.out(LIBRARY_TAG, args);
    }

    /// Print an error under [`LIBRARY_TAG`].
    #[deprecated(note = "name a tag and use `TagRegistry::out_error` instead")]
    pub fn log_error<E>(&self, err: &E)
    where
        E: std::error::Error + ?Sized,
    {
        self.out_error(LIBRARY_TAG, err);
    }

    pub(crate) fn emit(
        &self,
        config: &TagConfig,
        level: Level,
        tag: &str,
        args: fmt::Arguments<'_>,
        stack: CallStack,
    ) {
        let sink = config.sink().or_else(|| self.logger.sink());
        self.logger.emit(sink.as_ref(), level, tag, args, stack);
    }
}
