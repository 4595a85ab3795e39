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

use std::fmt::Write;

use crate::Error;
use crate::Layout;
use crate::layout::location;
use crate::record::Record;

/// The default frame depth used by [`CallerLayout`].
///
/// Depth zero is the caller of the logging entry point.
pub const DEFAULT_STACK_DEPTH: usize = 0;

/// A layout that prefixes the message with the caller location.
///
/// Output format:
///
/// ```text
/// main.rs[12] : connected
/// ```
///
/// The tag is not part of the line; sinks using this layout pass it to their target separately.
///
/// # Examples
///
/// ```
/// use tagforth::layout::CallerLayout;
///
/// let layout = CallerLayout::default().with_stack_depth(1);
/// ```
#[derive(Debug, Clone)]
pub struct CallerLayout {
    stack_depth: usize,
}

impl Default for CallerLayout {
    fn default() -> Self {
        Self {
            stack_depth: DEFAULT_STACK_DEPTH,
        }
    }
}

impl CallerLayout {
    /// Select the frame used for the location. Depths beyond the captured stack fall back to the
    /// outermost frame.
    pub fn with_stack_depth(mut self, stack_depth: usize) -> Self {
        self.stack_depth = stack_depth;
        self
    }

    /// The configured frame depth.
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }
}

impl Layout for CallerLayout {
    fn format(&self, record: &Record) -> Result<String, Error> {
        let (file, line) = location(record.stack().frame(self.stack_depth));
        let message = record.payload();

        let mut text = String::new();
        write!(&mut text, "{file}[{line}] : {message}").map_err(Error::from_fmt_error)?;
        Ok(text)
    }
}
