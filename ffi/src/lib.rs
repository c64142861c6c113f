//! C-ABI wrapper around `request-core`.
//!
//! # Overview
//! Exposes the callback-style request interface through `extern "C"`
//! functions so any language with a C FFI can issue HTTP requests and receive
//! the outcome through a completion callback.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `request_client_new` creates an opaque handle owning a multi-thread
//!   tokio runtime; `request_perform` copies its inputs, spawns the request
//!   onto that runtime, and returns immediately. The callback fires later
//!   from a runtime worker thread.
//! - Null client, null url, and a null callback are reported synchronously
//!   through `FfiRequestStatus` before any network activity; in those cases
//!   the callback is never invoked. The null-callback case mirrors the
//!   missing-callback usage error of the original dynamic interface, which
//!   the typed Rust API cannot express.
//! - Freeing the client drops the runtime, aborting in-flight requests;
//!   their callbacks will not fire.

pub mod types;

use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};

use request_core::{request_with_options, FetchTransport, Outcome, RequestOptions};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a request client with its own async runtime.
///
/// Returns null if the runtime cannot be built or an internal panic occurs.
/// The caller must free the returned pointer with `request_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn request_client_new() -> *mut FfiRequestClient {
    catch_unwind(|| {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(_) => return std::ptr::null_mut(),
        };
        Box::into_raw(Box::new(FfiRequestClient {
            runtime,
            transport: FetchTransport::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `request_client_new`. Safe to call with null.
/// In-flight requests are aborted and their callbacks never fire.
#[unsafe(no_mangle)]
pub extern "C" fn request_client_free(client: *mut FfiRequestClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Perform
// ---------------------------------------------------------------------------

/// Carries the C callback and its user pointer into the spawned task. The C
/// caller is responsible for making `user_data` safe to touch from another
/// thread while the request is in flight.
struct CallbackHandle {
    callback: extern "C" fn(*const c_char, *const c_char, u16, *mut c_void),
    user_data: *mut c_void,
}

unsafe impl Send for CallbackHandle {}

/// Issue one HTTP request and deliver the outcome to `callback`.
///
/// `options` may be null for a plain GET. Returns `Ok` if the request was
/// dispatched; any other status is a synchronous rejection and the callback
/// will never be invoked. On dispatch, the callback is invoked exactly once
/// from a runtime worker thread with either an error message or a body.
#[unsafe(no_mangle)]
pub extern "C" fn request_perform(
    client: *const FfiRequestClient,
    url: *const c_char,
    options: *const FfiRequestOptions,
    callback: FfiRequestCallback,
    user_data: *mut c_void,
) -> FfiRequestStatus {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiRequestStatus::NullClient;
        }
        if url.is_null() {
            return FfiRequestStatus::NullUrl;
        }
        let Some(callback) = callback else {
            return FfiRequestStatus::MissingCallback;
        };

        let client = unsafe { &*client };
        let url = unsafe { std::ffi::CStr::from_ptr(url) }
            .to_str()
            .unwrap_or("")
            .to_string();
        let options = if options.is_null() {
            RequestOptions::default()
        } else {
            unsafe { (*options).to_core() }
        };

        let handle = CallbackHandle {
            callback,
            user_data,
        };
        let transport = client.transport.clone();

        client.runtime.spawn(async move {
            request_with_options(&transport, &url, options, move |outcome| {
                deliver(handle, outcome);
            })
            .await;
        });
        FfiRequestStatus::Ok
    }))
    .unwrap_or(FfiRequestStatus::Panic)
}

/// Convert an `Outcome` into the C callback triple and invoke the callback.
/// The `CString`s stay alive for the duration of the call only.
fn deliver(handle: CallbackHandle, outcome: Outcome) {
    match outcome {
        Outcome::Success { body, response } => {
            let body = to_cstring(body);
            (handle.callback)(
                std::ptr::null(),
                body.as_ptr(),
                response.status,
                handle.user_data,
            );
        }
        Outcome::TransportFailed(error) => {
            let error = to_cstring(error.to_string());
            (handle.callback)(error.as_ptr(), std::ptr::null(), 0, handle.user_data);
        }
        Outcome::BodyFailed { error, response } => {
            let error = to_cstring(error.to_string());
            (handle.callback)(
                error.as_ptr(),
                std::ptr::null(),
                response.status,
                handle.user_data,
            );
        }
    }
}

/// Interior NUL bytes cannot cross the C boundary; fall back to an empty
/// string rather than panicking on a runtime thread.
fn to_cstring(s: String) -> CString {
    CString::new(s).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::ffi::CStr;
    use std::sync::mpsc::{channel, Sender};
    use std::time::Duration;

    use super::*;

    /// What one callback invocation carried.
    struct Delivery {
        error: Option<String>,
        body: Option<String>,
        status: u16,
    }

    /// Test callback: reclaims the boxed sender from `user_data` and ships
    /// the delivered triple back to the test thread. Invoked exactly once,
    /// so taking ownership of the box is sound.
    extern "C" fn capture(
        error: *const c_char,
        body: *const c_char,
        status: u16,
        user_data: *mut c_void,
    ) {
        let read = |ptr: *const c_char| {
            if ptr.is_null() {
                None
            } else {
                Some(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string())
            }
        };
        let sender = unsafe { Box::from_raw(user_data as *mut Sender<Delivery>) };
        sender
            .send(Delivery {
                error: read(error),
                body: read(body),
                status,
            })
            .unwrap();
    }

    fn start_server() -> std::net::SocketAddr {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });
        addr
    }

    /// Dispatch a request and wait for its callback delivery.
    fn perform(
        client: *const FfiRequestClient,
        url: &str,
        options: *const FfiRequestOptions,
    ) -> Delivery {
        let url = CString::new(url).unwrap();
        let (tx, rx) = channel::<Delivery>();
        let user_data = Box::into_raw(Box::new(tx)) as *mut c_void;
        let status = request_perform(client, url.as_ptr(), options, Some(capture), user_data);
        assert!(matches!(status, FfiRequestStatus::Ok));
        rx.recv_timeout(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn client_new_and_free() {
        let client = request_client_new();
        assert!(!client.is_null());
        request_client_free(client);
    }

    #[test]
    fn client_free_null_is_safe() {
        request_client_free(std::ptr::null_mut());
    }

    #[test]
    fn perform_null_client_is_rejected() {
        let url = CString::new("http://localhost/get").unwrap();
        let status = request_perform(
            std::ptr::null(),
            url.as_ptr(),
            std::ptr::null(),
            Some(capture),
            std::ptr::null_mut(),
        );
        assert!(matches!(status, FfiRequestStatus::NullClient));
    }

    #[test]
    fn perform_null_url_is_rejected() {
        let client = request_client_new();
        let status = request_perform(
            client,
            std::ptr::null(),
            std::ptr::null(),
            Some(capture),
            std::ptr::null_mut(),
        );
        assert!(matches!(status, FfiRequestStatus::NullUrl));
        request_client_free(client);
    }

    #[test]
    fn perform_without_callback_is_rejected_synchronously() {
        let client = request_client_new();
        let url = CString::new("http://localhost/get").unwrap();
        let status = request_perform(
            client,
            url.as_ptr(),
            std::ptr::null(),
            None,
            std::ptr::null_mut(),
        );
        assert!(matches!(status, FfiRequestStatus::MissingCallback));
        request_client_free(client);
    }

    #[test]
    fn perform_get_delivers_body_through_callback() {
        let addr = start_server();
        let client = request_client_new();
        assert!(!client.is_null());

        let delivery = perform(client, &format!("http://{addr}/get"), std::ptr::null());
        assert!(delivery.error.is_none());
        assert_eq!(delivery.body.as_deref(), Some("OK"));
        assert_eq!(delivery.status, 200);

        request_client_free(client);
    }

    #[test]
    fn perform_post_echoes_body() {
        let addr = start_server();
        let client = request_client_new();
        let body = CString::new(r#"{"hello":"world"}"#).unwrap();
        let options = FfiRequestOptions {
            method: FfiMethod::Post,
            headers: std::ptr::null(),
            headers_len: 0,
            body: body.as_ptr(),
        };

        let delivery = perform(client, &format!("http://{addr}/post"), &options);
        assert!(delivery.error.is_none());
        assert_eq!(delivery.body.as_deref(), Some(r#"{"hello":"world"}"#));

        request_client_free(client);
    }

    #[test]
    fn perform_invalid_url_delivers_error_through_callback() {
        let client = request_client_new();

        let delivery = perform(client, "invalid_url", std::ptr::null());
        assert_eq!(
            delivery.error.as_deref(),
            Some("Only absolute URLs are supported")
        );
        assert!(delivery.body.is_none());
        assert_eq!(delivery.status, 0);

        request_client_free(client);
    }
}
