//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type using C-compatible representations:
//! `*const c_char` instead of `String`, a pointer + length pair instead of
//! `Vec`, and enums with explicit discriminants. Conversion functions live
//! here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

use request_core::{FetchTransport, Method, RequestOptions};

/// Opaque handle owning the async runtime and the HTTP transport. C callers
/// receive a pointer to this and pass it back into every FFI function.
pub struct FfiRequestClient {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) transport: FetchTransport,
}

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl FfiMethod {
    pub(crate) fn to_core(&self) -> Method {
        match self {
            FfiMethod::Get => Method::Get,
            FfiMethod::Post => Method::Post,
            FfiMethod::Put => Method::Put,
            FfiMethod::Delete => Method::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// Request options as C-compatible plain data.
///
/// All pointers are borrowed for the duration of `request_perform`; the C
/// caller keeps ownership. A null options pointer at the call site means
/// "plain GET, no headers, no body".
#[repr(C)]
pub struct FfiRequestOptions {
    pub method: FfiMethod,
    pub headers: *const FfiHeader,
    pub headers_len: u32,
    pub body: *const c_char,
}

impl FfiRequestOptions {
    /// Copy the C options into owned core options. Headers with a null key
    /// or value are skipped.
    ///
    /// # Safety
    /// `headers` must point to `headers_len` valid `FfiHeader` values (or be
    /// null), and every non-null string pointer must be a valid
    /// NUL-terminated C string.
    pub(crate) unsafe fn to_core(&self) -> RequestOptions {
        let mut headers = Vec::new();
        if !self.headers.is_null() && self.headers_len > 0 {
            let raw = unsafe { std::slice::from_raw_parts(self.headers, self.headers_len as usize) };
            for header in raw {
                if header.key.is_null() || header.value.is_null() {
                    continue;
                }
                let key = unsafe { CStr::from_ptr(header.key) }
                    .to_str()
                    .unwrap_or("")
                    .to_string();
                let value = unsafe { CStr::from_ptr(header.value) }
                    .to_str()
                    .unwrap_or("")
                    .to_string();
                headers.push((key, value));
            }
        }

        let body = if self.body.is_null() {
            None
        } else {
            Some(
                unsafe { CStr::from_ptr(self.body) }
                    .to_str()
                    .unwrap_or("")
                    .to_string(),
            )
        };

        RequestOptions {
            method: self.method.to_core(),
            headers,
            body,
        }
    }
}

/// Completion callback invoked exactly once per accepted `request_perform`
/// call, from a runtime worker thread.
///
/// Exactly one of `error` / `body` is non-null. `status` is the HTTP status
/// code of the response, or 0 when no response was obtained. String pointers
/// are valid only for the duration of the call — copy what you need.
pub type FfiRequestCallback =
    Option<extern "C" fn(error: *const c_char, body: *const c_char, status: u16, user_data: *mut c_void)>;

/// Synchronous result of `request_perform`. Anything other than `Ok` means
/// the request was rejected before any network activity and the callback
/// will never be invoked.
#[repr(C)]
pub enum FfiRequestStatus {
    Ok = 0,
    NullClient = 1,
    NullUrl = 2,
    /// No callback was provided — a programming error, not a network failure.
    MissingCallback = 3,
    Panic = 4,
}
