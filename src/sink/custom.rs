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

use std::fmt;

use crate::Error;
use crate::Sink;
use crate::record::Record;

type WriteFunction = dyn Fn(&Record) -> Result<(), Error> + Send + Sync + 'static;

/// A sink backed by a closure.
///
/// ```rust
/// use tagforth::sink::CustomSink;
///
/// let sink = CustomSink::new(|record| {
///     eprintln!("{} {} {}", record.level(), record.tag(), record.payload());
///     Ok(())
/// });
/// ```
pub struct CustomSink {
    f: Box<WriteFunction>,
}

impl fmt::Debug for CustomSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomSink {{ ... }}")
    }
}

impl CustomSink {
    /// Create a sink from a write function.
    pub fn new(f: impl Fn(&Record) -> Result<(), Error> + Send + Sync + 'static) -> Self {
        CustomSink { f: Box::new(f) }
    }
}

impl Sink for CustomSink {
    fn write(&self, record: &Record) -> Result<(), Error> {
        (self.f)(record)
    }
}
