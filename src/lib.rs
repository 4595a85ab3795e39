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

//! Tagforth is a small logging facade: one process-wide sink selected at startup, plus a
//! registry that scopes enablement, level and sink per tag.
//!
//! # Overview
//!
//! On first use the process-wide [`Logger`] probes the host platform for a native logging
//! facility (see [`sink::detect`]). If there is none, records go to the console. The sink can be
//! replaced at any time.
//!
//! The [`TagRegistry`] sits on top of a logger. Every tag can be disabled, given a default level
//! or routed to its own sink; tags are created on first reference.
//!
//! Errors raised while writing a record never reach the caller; they are handed to a
//! [`Trap`].
//!
//! # Examples
//!
//! Log through the process-wide logger:
//!
//! ```
//! use tagforth::Level;
//! use tagforth::out;
//!
//! out!(Level::INFO, "Test", "Hello {}", "World");
//! ```
//!
//! Configure tags on an explicit registry:
//!
//! ```
//! use std::sync::Arc;
//!
//! use tagforth::Level;
//! use tagforth::Logger;
//! use tagforth::TagRegistry;
//! use tagforth::sink::Testing;
//! use tagforth::tag_out;
//!
//! let logger = Arc::new(Logger::builder().sink(Testing::default()).build());
//! let registry = TagRegistry::new(logger);
//!
//! registry.apply_directives(&"db=off,net=debug".parse().unwrap());
//!
//! tag_out!(registry: registry, "net", "handshake with {}", "peer-1");
//! tag_out!(registry: registry, "db", "dropped");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod layout;
pub mod record;
pub mod registry;
pub mod sink;
pub mod trap;

mod error;
pub use self::error::Error;

mod logger;
pub use self::logger::*;

mod macros;

pub use self::layout::Layout;
pub use self::record::Level;
pub use self::registry::TagRegistry;
pub use self::registry::default_registry;
pub use self::sink::Sink;
pub use self::trap::Trap;
