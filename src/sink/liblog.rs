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

//! The Android `liblog` facility, bound at runtime with `dlopen`.
//!
//! Outside Android the library is absent and [`LibLog::open`] fails, which makes
//! [`detect`](super::detect) fall back to the console.

use std::ffi::CString;
use std::sync::Arc;

use crate::Error;
use crate::sink::DEBUG_METHOD;
use crate::sink::Facility;
use crate::sink::INFO_METHOD;
use crate::sink::NativeMethod;
use crate::sink::WARN_METHOD;

const LIBRARY: &std::ffi::CStr = c"liblog.so";
const SYMBOL: &std::ffi::CStr = c"__android_log_write";

// android/log.h
const ANDROID_LOG_DEBUG: libc::c_int = 3;
const ANDROID_LOG_INFO: libc::c_int = 4;
const ANDROID_LOG_WARN: libc::c_int = 5;

type AndroidLogWrite = unsafe extern "C" fn(
    prio: libc::c_int,
    tag: *const libc::c_char,
    text: *const libc::c_char,
) -> libc::c_int;

/// The native Android logging facility.
///
/// The library handle is never closed; the resolved function stays valid for the process
/// lifetime.
#[derive(Debug, Clone, Copy)]
pub struct LibLog {
    write: AndroidLogWrite,
}

impl LibLog {
    /// Load `liblog.so` and resolve `__android_log_write`.
    pub fn open() -> Result<Self, Error> {
        let handle = unsafe { libc::dlopen(LIBRARY.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            return Err(Error::new("failed to load native logging library")
                .with_context("library", LIBRARY.to_string_lossy()));
        }

        let symbol = unsafe { libc::dlsym(handle, SYMBOL.as_ptr()) };
        if symbol.is_null() {
            unsafe { libc::dlclose(handle) };
            return Err(Error::new("failed to resolve native logging function")
                .with_context("library", LIBRARY.to_string_lossy())
                .with_context("symbol", SYMBOL.to_string_lossy()));
        }

        // SAFETY: `__android_log_write` has this signature in every liblog release.
        let write = unsafe { std::mem::transmute::<*mut libc::c_void, AndroidLogWrite>(symbol) };
        Ok(Self { write })
    }
}

fn priority(method: &str) -> Option<libc::c_int> {
    match method {
        INFO_METHOD => Some(ANDROID_LOG_INFO),
        DEBUG_METHOD => Some(ANDROID_LOG_DEBUG),
        WARN_METHOD => Some(ANDROID_LOG_WARN),
        _ => None,
    }
}

impl Facility for LibLog {
    fn name(&self) -> &str {
        "liblog"
    }

    fn resolve(&self, method: &str) -> Option<NativeMethod> {
        let prio = priority(method)?;
        let write = self.write;
        let method: NativeMethod = Arc::new(move |tag: &str, message: &str| {
            let tag = CString::new(tag)
                .map_err(|err| Error::new("tag contains a nul byte").with_source(err))?;
            let text = CString::new(message)
                .map_err(|err| Error::new("message contains a nul byte").with_source(err))?;
            let code = unsafe { write(prio, tag.as_ptr(), text.as_ptr()) };
            if code < 0 {
                Err(Error::new("native log write failed").with_context("code", code))
            } else {
                Ok(())
            }
        });
        Some(method)
    }
}
