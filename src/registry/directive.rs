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

use std::str::FromStr;

use crate::Error;
use crate::record::Level;

/// A single setting for a tag.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Directive {
    /// Enable (`on`) or disable (`off`) the tag.
    Enable(bool),
    /// Set the default level of the tag.
    Level(Level),
}

impl FromStr for Directive {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("on") {
            Ok(Directive::Enable(true))
        } else if s.eq_ignore_ascii_case("off") {
            Ok(Directive::Enable(false))
        } else {
            s.parse().map(Directive::Level)
        }
    }
}

/// An ordered list of tag settings.
///
/// The textual form is a comma separated list of `tag=value` pairs, where the value is `on`,
/// `off` or a level name:
///
/// ```
/// use tagforth::registry::Directives;
///
/// let directives: Directives = "net=off, db=debug, ui=on".parse().unwrap();
/// assert_eq!(directives.iter().count(), 3);
/// ```
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Directives {
    entries: Vec<(String, Directive)>,
}

impl Directives {
    /// Append a setting.
    pub fn push(&mut self, tag: impl Into<String>, directive: Directive) {
        self.entries.push((tag.into(), directive));
    }

    /// Iterate the settings in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Directive)> {
        self.entries.iter().map(|(tag, d)| (tag.as_str(), d))
    }
}

impl FromStr for Directives {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut directives = Directives::default();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((tag, value)) = entry.split_once('=') else {
                return Err(Error::new("directive must be `tag=value`").with_context("entry", entry));
            };
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(Error::new("directive has an empty tag").with_context("entry", entry));
            }
            let directive = value
                .trim()
                .parse()
                .map_err(|err: Error| err.with_context("entry", entry))?;
            directives.push(tag, directive);
        }
        Ok(directives)
    }
}
