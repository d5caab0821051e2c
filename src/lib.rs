//! Purpose: Library crate showing additive API evolution through versioned modules.
//! Exports: Current-generation items at the root; `v0`, `v1`, `inline` for pinned access.
//! Role: Backs the `api-updates` demo CLI and the `au_*` C ABI.
//! Invariants: Unqualified root items resolve to the current tag of their group.
//! Invariants: Published generation modules are append-only; old entry points forward.
//!
//! ```
//! let params = api_updates::Params::new("John");
//! assert!(api_updates::init(&params).contains("John"));
//!
//! // Pinned access to an older generation still compiles and behaves the same.
//! let old = api_updates::v0::Params::new("John");
//! assert_eq!(api_updates::v0::init(&old), api_updates::init(&params));
//! ```
pub mod abi;
pub mod capability;
pub mod error;
pub mod generation;
pub mod inline;
pub mod internal;
pub mod report;
pub mod v0;
pub mod v1;

// Public group: current tag is v_1. `foo` is unchanged since v_0.
pub use v0::{FOO_DEFAULT_ARG, foo, foo_with};
pub use v1::{Params, init};

// Inline group: current tag is inline_v_1.
pub use inline::inline_v1::bar;

pub use capability::{FixedClass, SomeClass, SomeInterface, use_some_class};
pub use error::{Error, ErrorKind, Result, to_exit_code};
pub use generation::{ContractGroup, Tag};
pub use internal::{
    ExposedInternalClass, InternalHandle, create_internal_class_instance, get_value,
};

#[cfg(test)]
mod tests {
    use crate::generation::{ContractGroup, Tag};

    #[test]
    fn root_items_follow_current_tags() {
        assert_eq!(Tag::current(ContractGroup::Public), Tag::V1);
        let current: crate::v1::Params = crate::Params::new("x");
        assert_eq!(crate::init(&current), crate::v1::init(&current));
        assert_eq!(Tag::current(ContractGroup::Inline), Tag::INLINE_V1);
        assert_eq!(crate::bar(), crate::inline::inline_v1::bar());
    }
}
