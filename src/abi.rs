//! Purpose: C ABI bridge (libapi_updates) over every generation of the contract.
//! Exports: C-callable `au_*` functions plus text/error/handle free helpers.
//! Role: Stable ABI surface; each exported symbol carries its version tag in its name.
//! Invariants: Opaque handles; explicit free functions; UTF-8 text out.
//! Invariants: Error kinds map 1:1 with `ErrorKind` via `to_exit_code`.
//! Invariants: Published symbols are never renamed; new behavior gets a new symbol.
#![allow(non_camel_case_types)]

use crate::error::{Error, ErrorKind, to_exit_code};
use crate::internal::{self, InternalHandle};
use crate::{inline, v0, v1};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Bumped only when an exported signature would change.
pub const ABI_VERSION: u32 = 1;

#[repr(C)]
pub struct au_internal {
    handle: InternalHandle,
}

#[repr(C)]
pub struct au_text {
    data: *mut c_char,
    len: usize,
}

#[repr(C)]
pub struct au_error {
    kind: i32,
    message: *mut c_char,
}

#[unsafe(no_mangle)]
pub extern "C" fn au_abi_version() -> u32 {
    ABI_VERSION
}

#[unsafe(no_mangle)]
pub extern "C" fn au_v0_init(
    name: *const c_char,
    out_text: *mut au_text,
    out_err: *mut *mut au_error,
) -> i32 {
    let name = match read_str(name, "name") {
        Ok(name) => name,
        Err(err) => return fail(out_err, err),
    };
    let text = v0::init(&v0::Params::new(name));
    finish_text(out_text, out_err, text)
}

#[unsafe(no_mangle)]
pub extern "C" fn au_v1_init(
    name: *const c_char,
    age: u32,
    has_age: u32,
    out_text: *mut au_text,
    out_err: *mut *mut au_error,
) -> i32 {
    let name = match read_str(name, "name") {
        Ok(name) => name,
        Err(err) => return fail(out_err, err),
    };
    let mut params = v1::Params::new(name);
    if has_age != 0 {
        params = params.with_age(age);
    }
    let text = v1::init(&params);
    finish_text(out_text, out_err, text)
}

#[unsafe(no_mangle)]
pub extern "C" fn au_v0_foo(out_text: *mut au_text, out_err: *mut *mut au_error) -> i32 {
    finish_text(out_text, out_err, v0::foo())
}

#[unsafe(no_mangle)]
pub extern "C" fn au_v0_foo_with(
    arg: i32,
    out_text: *mut au_text,
    out_err: *mut *mut au_error,
) -> i32 {
    finish_text(out_text, out_err, v0::foo_with(arg))
}

#[unsafe(no_mangle)]
pub extern "C" fn au_inline_v0_bar() -> i32 {
    inline::inline_v0::bar()
}

#[unsafe(no_mangle)]
pub extern "C" fn au_inline_v1_bar() -> i32 {
    inline::inline_v1::bar()
}

#[unsafe(no_mangle)]
pub extern "C" fn au_internal_create(
    value: i32,
    out_handle: *mut *mut au_internal,
    out_err: *mut *mut au_error,
) -> i32 {
    if out_handle.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_handle is null"),
        );
    }
    let handle = match internal::create_internal_class_instance(value) {
        Ok(handle) => handle,
        Err(err) => return fail(out_err, err),
    };
    unsafe {
        *out_handle = Box::into_raw(Box::new(au_internal { handle }));
    }
    0
}

/// Returns a second holder of the same instance, or null for a null input.
#[unsafe(no_mangle)]
pub extern "C" fn au_internal_clone(handle: *const au_internal) -> *mut au_internal {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let handle = unsafe { &*handle }.handle.clone();
    Box::into_raw(Box::new(au_internal { handle }))
}

#[unsafe(no_mangle)]
pub extern "C" fn au_internal_get_value(
    handle: *const au_internal,
    out_value: *mut i32,
    out_err: *mut *mut au_error,
) -> i32 {
    if handle.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("handle is null"),
        );
    }
    if out_value.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_value is null"),
        );
    }
    let handle = unsafe { &*handle };
    unsafe {
        *out_value = internal::get_value(&handle.handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn au_internal_free(handle: *mut au_internal) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn au_text_free(text: *mut au_text) {
    if text.is_null() {
        return;
    }
    unsafe {
        let text = &mut *text;
        if !text.data.is_null() {
            drop(CString::from_raw(text.data));
        }
        text.data = ptr::null_mut();
        text.len = 0;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn au_error_free(err: *mut au_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
    }
}

impl au_text {
    pub fn empty() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }

    /// Borrow the text as UTF-8; `None` when nothing has been written.
    pub fn as_str(&self) -> Option<&str> {
        if self.data.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(self.data) }.to_str().ok()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl au_error {
    pub fn kind(&self) -> i32 {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        if self.message.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(self.message) }.to_str().ok()
    }
}

fn read_str(input: *const c_char, field: &str) -> Result<String, Error> {
    if input.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message(format!("{field} is null")));
    }
    unsafe { CStr::from_ptr(input) }
        .to_str()
        .map(str::to_string)
        .map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("{field} is not valid UTF-8"))
                .with_source(err)
        })
}

fn finish_text(out_text: *mut au_text, out_err: *mut *mut au_error, text: String) -> i32 {
    match write_text(out_text, text) {
        Ok(()) => 0,
        Err(err) => fail(out_err, err),
    }
}

fn write_text(out_text: *mut au_text, text: String) -> Result<(), Error> {
    if out_text.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("out_text is null"));
    }
    let len = text.len();
    let text = CString::new(text).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("text contains an interior nul byte")
            .with_source(err)
    })?;
    unsafe {
        let out = &mut *out_text;
        // Reused buffers release their previous text.
        if !out.data.is_null() {
            drop(CString::from_raw(out.data));
        }
        out.data = text.into_raw();
        out.len = len;
    }
    Ok(())
}

fn fail(out_err: *mut *mut au_error, err: Error) -> i32 {
    tracing::debug!(kind = err.kind().as_str(), "abi call failed");
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(au_error {
        kind: to_exit_code(err.kind()),
        message: to_c_string(&err.to_string()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}
