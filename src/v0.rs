//! Purpose: Public generation `v_0`, kept for callers compiled against it.
//! Exports: `Params`, `init`, `foo`, `foo_with`, `FOO_DEFAULT_ARG`.
//! Role: Compatibility shims over `v_1` plus the `foo` overload pair.
//! Invariants: Signatures here never change; bodies may only forward.
//! Invariants: Shims set new-generation fields to their documented defaults only.
use crate::generation::Tag;
use crate::v1;

/// Initialization record as published in `v_0`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params {
    pub name: String,
}

impl Params {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&Params> for v1::Params {
    fn from(params: &Params) -> Self {
        // Only fields that existed in v_0; the rest stay at their defaults.
        v1::Params {
            name: params.name.clone(),
            ..v1::Params::default()
        }
    }
}

pub fn init(params: &Params) -> String {
    tracing::debug!(tag = %Tag::V0, "init forwarding to v_1");
    v1::init(&v1::Params::from(params))
}

/// Argument `foo()` has always used.
pub const FOO_DEFAULT_ARG: i32 = 0;

pub fn foo_with(arg: i32) -> String {
    tracing::debug!(tag = %Tag::V0, arg, "foo");
    format!("hello from foo with arg: {arg}")
}

pub fn foo() -> String {
    foo_with(FOO_DEFAULT_ARG)
}
