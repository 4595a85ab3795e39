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

//! Terminal consumers of formatted log records.

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::record::Record;

mod console;
mod custom;
#[cfg(any(target_os = "android", all(feature = "native-liblog", unix)))]
mod liblog;
mod platform;

pub use self::console::Console;
pub use self::console::Stream;
pub use self::console::Testing;
pub use self::custom::CustomSink;
#[cfg(any(target_os = "android", all(feature = "native-liblog", unix)))]
pub use self::liblog::LibLog;
pub use self::platform::DEBUG_METHOD;
pub use self::platform::Facility;
pub use self::platform::INFO_METHOD;
pub use self::platform::NativeMethod;
pub use self::platform::PlatformSink;
pub use self::platform::StaticFacility;
pub use self::platform::WARN_METHOD;

/// A sink writes a log record to its target.
///
/// Errors returned here never reach the code that logged the record; the logger hands them to
/// its [`Trap`](crate::trap::Trap).
pub trait Sink: fmt::Debug + Send + Sync + 'static {
    /// Write a log record to the sink target.
    fn write(&self, record: &Record) -> Result<(), Error>;

    /// Flush any buffered records.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Look up the native logging facility of the host platform.
///
/// Returns an error when the process does not run on a host that provides one, which is the
/// expected outcome on most platforms.
#[cfg(any(target_os = "android", all(feature = "native-liblog", unix)))]
pub fn locate() -> Result<Box<dyn Facility>, Error> {
    LibLog::open().map(|facility| Box::new(facility) as Box<dyn Facility>)
}

/// Look up the native logging facility of the host platform.
///
/// No facility is compiled in; this always returns an error.
#[cfg(not(any(target_os = "android", all(feature = "native-liblog", unix))))]
pub fn locate() -> Result<Box<dyn Facility>, Error> {
    Err(Error::new(
        "no native logging facility is available on this platform",
    ))
}

/// Probe the host platform once and pick a sink.
///
/// A [`PlatformSink`] is returned when [`locate`] succeeds, a [`Console`] otherwise.
pub fn detect() -> Arc<dyn Sink> {
    let facility = locate().ok();
    detect_with(facility.as_deref())
}

/// Pick a sink for an optional, externally provided facility.
///
/// # Examples
///
/// ```
/// use tagforth::sink;
///
/// let console = sink::detect_with(None);
/// assert!(format!("{console:?}").starts_with("Console"));
/// ```
pub fn detect_with(facility: Option<&dyn Facility>) -> Arc<dyn Sink> {
    match facility {
        Some(facility) => Arc::new(PlatformSink::new(facility)),
        None => Arc::new(Console::default()),
    }
}
