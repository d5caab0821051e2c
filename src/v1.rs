//! Purpose: Public generation `v_1`, the current default of the public contract.
//! Exports: `Params`, `init`.
//! Role: Owns the real `init` logic; `v_0` entry points delegate here.
//! Invariants: Append-only once published; new fields must carry a default.
//! Invariants: `Params::default().age == Params::DEFAULT_AGE`.
use crate::generation::Tag;

/// Initialization record for `v_1`; a superset of `v0::Params`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Params {
    pub name: String,
    pub age: u32,
}

impl Params {
    /// Value of `age` whenever a caller does not set it.
    pub const DEFAULT_AGE: u32 = 0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: Self::DEFAULT_AGE,
        }
    }
}

pub fn init(params: &Params) -> String {
    tracing::debug!(tag = %Tag::V1, name = %params.name, age = params.age, "init");
    format!("hello from init: name: {}, age: {}", params.name, params.age)
}

#[cfg(test)]
mod tests {
    use super::{Params, init};

    #[test]
    fn default_age_is_documented_constant() {
        assert_eq!(Params::default().age, Params::DEFAULT_AGE);
        assert_eq!(Params::new("John").age, Params::DEFAULT_AGE);
    }

    #[test]
    fn init_renders_every_field() {
        let params = Params::new("Ada").with_age(36);
        assert_eq!(init(&params), "hello from init: name: Ada, age: 36");
    }

    #[test]
    fn init_with_unset_age_shows_default() {
        let text = init(&Params::new("John"));
        assert!(text.contains("John"));
        assert!(text.ends_with("age: 0"));
    }
}
