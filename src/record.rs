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

//! Log record, severity level and caller location.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

/// The severity of a log record.
///
/// Levels select the sink operation and the line format; they are not ordered and never filter
/// records by threshold. The raw code is kept so that codes outside the known set stay
/// representable; sinks treat them like [`Level::DEBUG`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Level(i32);

impl Level {
    /// Designates useful information.
    pub const INFO: Level = Level(1);
    /// Designates lower priority information.
    pub const DEBUG: Level = Level(2);
    /// Designates errors.
    pub const ERROR: Level = Level(3);

    /// Create a level from its raw code.
    pub const fn from_raw(code: i32) -> Level {
        Level(code)
    }

    /// The raw code of this level.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Return the name of a known level.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Level::INFO => Some("INFO"),
            Level::DEBUG => Some("DEBUG"),
            Level::ERROR => Some("ERROR"),
            _ => None,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl From<i32> for Level {
    fn from(code: i32) -> Self {
        Level(code)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(name) => f.pad(name),
            None => write!(f, "LEVEL({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for level in [Level::INFO, Level::DEBUG, Level::ERROR] {
            if let Some(name) = level.as_str() {
                if s.eq_ignore_ascii_case(name) {
                    return Ok(level);
                }
            }
        }
        Err(Error::new("unknown level name").with_context("input", s))
    }
}

/// A single caller location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Frame {
    file: Cow<'static, str>,
    line: u32,
}

impl Frame {
    /// Create a frame from a file path and a line number.
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The full source file path.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The final component of the source file path.
    pub fn filename(&self) -> &str {
        Path::new(&*self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&*self.file)
    }

    /// The line number.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for Frame {
    fn from(location: &'static Location<'static>) -> Self {
        Frame::new(location.file(), location.line())
    }
}

/// Caller frames attached to a record, innermost first.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    /// Capture the caller of the public logging entry point.
    ///
    /// Every entry point in this crate is `#[track_caller]`, so the captured frame is the code
    /// that asked for the record to be logged.
    #[track_caller]
    pub fn capture() -> Self {
        Self {
            frames: vec![Frame::from(Location::caller())],
        }
    }

    /// Create a stack from explicit frames, innermost first.
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append the caller of the current function as an outer frame.
    ///
    /// Called from a `#[track_caller]` wrapper, the appended frame is the wrapper's caller. The
    /// stack is then handed to [`Logger::out_with_stack`](crate::Logger::out_with_stack) or
    /// [`TagRegistry::out_with_stack`](crate::TagRegistry::out_with_stack).
    #[track_caller]
    pub fn with_caller(mut self) -> Self {
        self.frames.push(Frame::from(Location::caller()));
        self
    }

    /// Return the frame at `depth`, or the outermost frame if the stack is shallower.
    ///
    /// Only an empty stack yields `None`.
    pub fn frame(&self, depth: usize) -> Option<&Frame> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.get(depth.min(last))
    }

    /// The number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame was captured.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    level: Level,
    tag: &'a str,
    payload: Cow<'a, str>,
    stack: CallStack,
}

impl<'a> Record<'a> {
    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }

    /// The severity of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The tag the message was logged under.
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    /// The formatted message body.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The caller frames.
    pub fn stack(&self) -> &CallStack {
        &self.stack
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                level: Level::default(),
                tag: "",
                payload: Cow::Borrowed(""),
                stack: CallStack::default(),
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`tag`](Record::tag).
    pub fn tag(mut self, tag: &'a str) -> Self {
        self.record.tag = tag;
        self
    }

    /// Set [`payload`](Record::payload).
    pub fn payload(mut self, payload: impl Into<Cow<'a, str>>) -> Self {
        self.record.payload = payload.into();
        self
    }

    /// Set [`stack`](Record::stack).
    pub fn stack(mut self, stack: CallStack) -> Self {
        self.record.stack = stack;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(Level::INFO.to_string(), "INFO");
        assert_eq!(Level::DEBUG.to_string(), "DEBUG");
        assert_eq!(Level::ERROR.to_string(), "ERROR");
        assert_eq!(Level::from_raw(42).to_string(), "LEVEL(42)");
        assert_eq!(Level::from(3), Level::ERROR);
        assert_eq!(Level::default(), Level::INFO);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::DEBUG);
        assert_eq!("Error".parse::<Level>().unwrap(), Level::ERROR);
        assert!("warn".parse::<Level>().is_err());
    }

    #[test]
    fn test_capture_points_at_caller() {
        let line = line!() + 1;
        let stack = CallStack::capture();
        let frame = stack.frame(0).unwrap();
        assert_eq!(frame.filename(), "record.rs");
        assert_eq!(frame.line(), line);
    }

    #[test]
    fn test_frame_depth_is_clamped() {
        let stack = CallStack::from_frames([
            Frame::new("src/inner.rs", 1),
            Frame::new("src/outer.rs", 2),
        ]);
        assert_eq!(stack.frame(0).unwrap().filename(), "inner.rs");
        assert_eq!(stack.frame(1).unwrap().filename(), "outer.rs");
        assert_eq!(stack.frame(2).unwrap().filename(), "outer.rs");
        assert_eq!(stack.frame(usize::MAX).unwrap().line(), 2);

        assert!(CallStack::default().frame(2).is_none());
    }

    #[test]
    fn test_with_caller_appends_outer_frame() {
        let stack = CallStack::from_frames([Frame::new("lib.rs", 7)]).with_caller();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.frame(1).unwrap().filename(), "record.rs");
    }

    #[test]
    fn test_filename_of_bare_name() {
        assert_eq!(Frame::new("main.rs", 3).filename(), "main.rs");
        assert_eq!(Frame::new(String::from("a/b/c.rs"), 3).filename(), "c.rs");
    }
}
