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

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::Error;
use crate::Layout;
use crate::Sink;
use crate::layout::CallerLayout;
use crate::record::Level;
use crate::record::Record;

/// The name of the native operation for [`Level::INFO`].
pub const INFO_METHOD: &str = "i";
/// The name of the native operation for [`Level::DEBUG`] and unknown levels.
pub const DEBUG_METHOD: &str = "d";
/// The name of the native operation for [`Level::ERROR`].
pub const WARN_METHOD: &str = "w";

/// A resolved native logging operation, called with `(tag, message)`.
pub type NativeMethod = Arc<dyn Fn(&str, &str) -> Result<(), Error> + Send + Sync + 'static>;

/// A logging facility provided by the host platform.
///
/// Operations are looked up by name once, when a [`PlatformSink`] is created.
pub trait Facility: fmt::Debug + Send + Sync + 'static {
    /// The name of the facility.
    fn name(&self) -> &str;

    /// Resolve a named operation, or `None` if the facility does not provide it.
    fn resolve(&self, method: &str) -> Option<NativeMethod>;
}

/// A facility backed by an in-process table of named operations.
///
/// # Examples
///
/// ```
/// use tagforth::sink::PlatformSink;
/// use tagforth::sink::StaticFacility;
///
/// let facility = StaticFacility::new("host").with_method("i", |tag, message| {
///     eprintln!("{tag}: {message}");
///     Ok(())
/// });
/// let sink = PlatformSink::new(&facility);
/// ```
#[derive(Clone)]
pub struct StaticFacility {
    name: String,
    methods: BTreeMap<String, NativeMethod>,
}

impl fmt::Debug for StaticFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticFacility")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StaticFacility {
    /// Create an empty facility.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Register a named operation.
    pub fn with_method(
        mut self,
        method: impl Into<String>,
        f: impl Fn(&str, &str) -> Result<(), Error> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(method.into(), Arc::new(f));
        self
    }
}

impl Facility for StaticFacility {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, method: &str) -> Option<NativeMethod> {
        self.methods.get(method).cloned()
    }
}

/// A sink that forwards records to the native logging facility of the host platform.
///
/// [`Level::INFO`] goes to the [`INFO_METHOD`] operation, [`Level::ERROR`] to [`WARN_METHOD`] and
/// every other level, including unknown codes, to [`DEBUG_METHOD`].
///
/// Writing never fails: missing operations, errors returned by an operation and panics inside it
/// all turn the call into a no-op.
pub struct PlatformSink {
    facility: String,
    info: Option<NativeMethod>,
    debug: Option<NativeMethod>,
    warn: Option<NativeMethod>,
    stack_info: bool,
    caller: CallerLayout,
}

impl fmt::Debug for PlatformSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformSink")
            .field("facility", &self.facility)
            .field("info", &self.info.is_some())
            .field("debug", &self.debug.is_some())
            .field("warn", &self.warn.is_some())
            .field("stack_info", &self.stack_info)
            .field("caller", &self.caller)
            .finish()
    }
}

impl PlatformSink {
    /// Bind the three native operations of `facility`.
    pub fn new(facility: &dyn Facility) -> Self {
        Self {
            facility: facility.name().to_owned(),
            info: facility.resolve(INFO_METHOD),
            debug: facility.resolve(DEBUG_METHOD),
            warn: facility.resolve(WARN_METHOD),
            stack_info: false,
            caller: CallerLayout::default(),
        }
    }

    /// Prefix messages with the caller location, as `<file>[<line>] : <message>`.
    ///
    /// Default to `false`.
    pub fn with_stack_info(mut self, stack_info: bool) -> Self {
        self.stack_info = stack_info;
        self
    }

    /// Select the frame used when stack info is enabled.
    ///
    /// Default to [`DEFAULT_STACK_DEPTH`](crate::layout::DEFAULT_STACK_DEPTH).
    pub fn with_stack_depth(mut self, stack_depth: usize) -> Self {
        self.caller = self.caller.with_stack_depth(stack_depth);
        self
    }

    fn method(&self, level: Level) -> Option<&NativeMethod> {
        match level {
            Level::INFO => self.info.as_ref(),
            Level::ERROR => self.warn.as_ref(),
            _ => self.debug.as_ref(),
        }
    }
}

impl Sink for PlatformSink {
    fn write(&self, record: &Record) -> Result<(), Error> {
        let Some(method) = self.method(record.level()) else {
            return Ok(());
        };

        let message = if self.stack_info {
            match self.caller.format(record) {
                Ok(message) => Cow::Owned(message),
                Err(_) => return Ok(()),
            }
        } else {
            Cow::Borrowed(record.payload())
        };

        let tag = record.tag();
        let _ = panic::catch_unwind(AssertUnwindSafe(|| method(tag, &message)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::record::CallStack;
    use crate::record::Frame;

    type Calls = Arc<Mutex<Vec<(String, String, String)>>>;

    fn facility(calls: &Calls, methods: &[&'static str]) -> StaticFacility {
        let mut facility = StaticFacility::new("host");
        for &method in methods {
            let calls = calls.clone();
            facility = facility.with_method(method, move |tag, message| {
                let mut calls = calls.lock().unwrap();
                calls.push((method.to_string(), tag.to_string(), message.to_string()));
                Ok(())
            });
        }
        facility
    }

    fn record(level: Level) -> Record<'static> {
        Record::builder()
            .level(level)
            .tag("net")
            .payload("hello")
            .stack(CallStack::from_frames([
                Frame::new("src/net.rs", 10),
                Frame::new("src/main.rs", 20),
            ]))
            .build()
    }

    #[test]
    fn test_level_to_method_mapping() {
        let calls = Calls::default();
        let sink = PlatformSink::new(&facility(&calls, &["i", "d", "w"]));

        for level in [
            Level::INFO,
            Level::ERROR,
            Level::DEBUG,
            Level::from_raw(7),
        ] {
            sink.write(&record(level)).unwrap();
        }

        let methods = calls
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _, _)| method.clone())
            .collect::<Vec<_>>();
        assert_eq!(methods, ["i", "w", "d", "d"]);
    }

    #[test]
    fn test_stack_info_prefix() {
        let calls = Calls::default();
        let sink = PlatformSink::new(&facility(&calls, &["i"])).with_stack_info(true);
        sink.write(&record(Level::INFO)).unwrap();

        let sink = PlatformSink::new(&facility(&calls, &["i"]))
            .with_stack_info(true)
            .with_stack_depth(5);
        sink.write(&record(Level::INFO)).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1, "net");
        assert_eq!(calls[0].2, "net.rs[10] : hello");
        assert_eq!(calls[1].2, "main.rs[20] : hello");
    }

    #[test]
    fn test_missing_method_is_noop() {
        let calls = Calls::default();
        let sink = PlatformSink::new(&facility(&calls, &["i"]));
        sink.write(&record(Level::ERROR)).unwrap();
        sink.write(&record(Level::DEBUG)).unwrap();
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_native_failures_are_discarded() {
        let facility = StaticFacility::new("broken")
            .with_method(INFO_METHOD, |_, _| Err(Error::new("native call failed")))
            .with_method(WARN_METHOD, |_, _| panic!("native call panicked"));
        let sink = PlatformSink::new(&facility);

        assert!(sink.write(&record(Level::INFO)).is_ok());
        assert!(sink.write(&record(Level::ERROR)).is_ok());
    }
}
