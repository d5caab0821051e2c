//! Purpose: Hide an implementation type behind an opaque shared handle.
//! Exports: `InternalHandle`, `ExposedInternalClass`, factory and accessor functions.
//! Role: Public code sees only the handle; the private type may change layout freely.
//! Invariants: `InternalClass` is never named in a public signature.
//! Invariants: Instances are immutable after construction; handles are `Send + Sync`.
//! Notes: Holders share one instance; it is dropped with the last handle.
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

mod imp {
    use crate::error::{Error, ErrorKind, Result};

    #[derive(Debug)]
    pub(super) struct InternalClass {
        value: i32,
    }

    impl InternalClass {
        pub(super) const MAX_VALUE: i32 = i32::MAX / 2;

        pub(super) fn new(value: i32) -> Result<Self> {
            if !(0..=Self::MAX_VALUE).contains(&value) {
                return Err(Error::new(ErrorKind::OutOfRange)
                    .with_message(format!("value {value} outside 0..={}", Self::MAX_VALUE))
                    .with_hint("Pass a non-negative value within range."));
            }
            Ok(Self { value })
        }

        pub(super) fn get_value(&self) -> i32 {
            self.value
        }
    }
}

/// Largest value the factory accepts.
pub const MAX_VALUE: i32 = imp::InternalClass::MAX_VALUE;

/// Shared reference to a private instance.
#[derive(Clone)]
pub struct InternalHandle(Arc<imp::InternalClass>);

impl fmt::Debug for InternalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InternalHandle")
            .field(&self.0.get_value())
            .finish()
    }
}

pub fn create_internal_class_instance(value: i32) -> Result<InternalHandle> {
    match imp::InternalClass::new(value) {
        Ok(instance) => {
            tracing::debug!(value, "created internal instance");
            Ok(InternalHandle(Arc::new(instance)))
        }
        Err(err) => {
            tracing::warn!(value, "rejected internal instance");
            Err(err)
        }
    }
}

pub fn get_value(handle: &InternalHandle) -> i32 {
    handle.0.get_value()
}

/// Number of live holders of the instance behind `handle`.
pub fn handle_count(handle: &InternalHandle) -> usize {
    Arc::strong_count(&handle.0)
}

/// Object-style facade over the handle functions.
#[derive(Clone, Debug)]
pub struct ExposedInternalClass {
    handle: InternalHandle,
}

impl ExposedInternalClass {
    pub fn new(value: i32) -> Result<Self> {
        create_internal_class_instance(value).map(Self::from_handle)
    }

    pub fn from_handle(handle: InternalHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &InternalHandle {
        &self.handle
    }

    pub fn get_value(&self) -> i32 {
        get_value(&self.handle)
    }
}

impl TryFrom<i32> for ExposedInternalClass {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}
