//! Purpose: Freely changeable helpers, versioned by their own inline tags.
//! Exports: `inline_v0`, `inline_v1`, `bar_for`.
//! Role: Each behavior change of a helper mints a new tag module.
//! Invariants: A tag module's results never change once published.
//! Invariants: Tags live apart from the public `v_N` tags and evolve independently.
use crate::error::{Error, ErrorKind, Result};
use crate::generation::{ContractGroup, Tag};

pub mod inline_v0 {
    #[inline]
    pub fn bar() -> i32 {
        10
    }
}

pub mod inline_v1 {
    #[inline]
    pub fn bar() -> i32 {
        20
    }
}

/// Run-time resolution of `bar` for a pinned inline tag.
pub fn bar_for(tag: Tag) -> Result<i32> {
    if tag.group() != ContractGroup::Inline {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("{tag} is not an inline tag"))
            .with_hint("Use inline_v_0 or inline_v_1."));
    }
    let value = match tag.index() {
        0 => inline_v0::bar(),
        1 => inline_v1::bar(),
        index => {
            return Err(Error::new(ErrorKind::Internal)
                .with_message(format!("no bar implementation for inline tag index {index}")));
        }
    };
    tracing::debug!(%tag, value, "bar");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{bar_for, inline_v0, inline_v1};
    use crate::error::ErrorKind;
    use crate::generation::{ContractGroup, Tag};

    #[test]
    fn each_tag_keeps_its_value() {
        assert_eq!(inline_v0::bar(), 10);
        assert_eq!(inline_v1::bar(), 20);
    }

    #[test]
    fn bar_for_follows_tag() {
        assert_eq!(bar_for(Tag::INLINE_V0).unwrap(), 10);
        assert_eq!(bar_for(Tag::INLINE_V1).unwrap(), 20);
        assert_eq!(
            bar_for(Tag::current(ContractGroup::Inline)).unwrap(),
            crate::bar()
        );
    }

    #[test]
    fn every_published_inline_tag_resolves() {
        let values: Vec<i32> = ContractGroup::Inline
            .tags()
            .map(|tag| bar_for(tag).expect("published tag"))
            .collect();
        assert_eq!(values, vec![10, 20]);
    }

    #[test]
    fn bar_for_rejects_public_tag() {
        let err = bar_for(Tag::V1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}
