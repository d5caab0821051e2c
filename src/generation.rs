//! Purpose: Registry of version tags and the current-tag resolution rule.
//! Exports: `ContractGroup`, `Tag`.
//! Role: Data view of the module layout; lets the CLI and ABI dispatch pinned calls.
//! Invariants: Exactly one tag per group is current; published tags are never removed.
//! Invariants: Tags are ordered by creation; a new tag always appends at the end.
use crate::error::{Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// Independently versioned groups of the public surface.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ContractGroup {
    /// Declarations with a stable signature (`init`, `foo`, `Params`).
    Public,
    /// Header-style helpers whose body may change between tags (`bar`).
    Inline,
}

// Creation-ordered tag counts; the last tag of each group is current.
const PUBLIC_TAGS: u16 = 2;
const INLINE_TAGS: u16 = 2;

impl ContractGroup {
    pub const ALL: [ContractGroup; 2] = [ContractGroup::Public, ContractGroup::Inline];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractGroup::Public => "public",
            ContractGroup::Inline => "inline",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            ContractGroup::Public => "v",
            ContractGroup::Inline => "inline_v",
        }
    }

    fn published(self) -> u16 {
        match self {
            ContractGroup::Public => PUBLIC_TAGS,
            ContractGroup::Inline => INLINE_TAGS,
        }
    }

    /// Every published tag in creation order.
    pub fn tags(self) -> impl Iterator<Item = Tag> {
        (0..self.published()).map(move |index| Tag { group: self, index })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tag {
    group: ContractGroup,
    index: u16,
}

impl Tag {
    pub const V0: Tag = Tag::new(ContractGroup::Public, 0);
    pub const V1: Tag = Tag::new(ContractGroup::Public, 1);
    pub const INLINE_V0: Tag = Tag::new(ContractGroup::Inline, 0);
    pub const INLINE_V1: Tag = Tag::new(ContractGroup::Inline, 1);

    const fn new(group: ContractGroup, index: u16) -> Self {
        Self { group, index }
    }

    /// The tag unqualified references resolve to.
    pub fn current(group: ContractGroup) -> Tag {
        Tag::new(group, group.published() - 1)
    }

    pub fn group(self) -> ContractGroup {
        self.group
    }

    pub fn index(self) -> u16 {
        self.index
    }

    pub fn is_current(self) -> bool {
        self == Tag::current(self.group)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.group.prefix(), self.index)
    }
}

impl FromStr for Tag {
    type Err = Error;

    /// Accepts `v_1`, `v1`, `inline_v_0`, `inline-v0` and similar spellings.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase().replace('-', "_");
        let (group, rest) = match normalized.strip_prefix("inline_v") {
            Some(rest) => (ContractGroup::Inline, rest),
            None => match normalized.strip_prefix('v') {
                Some(rest) => (ContractGroup::Public, rest),
                None => return Err(unknown_tag(input)),
            },
        };
        let digits = rest.strip_prefix('_').unwrap_or(rest);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown_tag(input));
        }
        let index: u16 = digits.parse().map_err(|_| unknown_tag(input))?;
        if index >= group.published() {
            return Err(unknown_tag(input));
        }
        Ok(Tag::new(group, index))
    }
}

fn unknown_tag(input: &str) -> Error {
    Error::new(ErrorKind::Usage)
        .with_message(format!("unknown version tag: {input}"))
        .with_hint("Run `api-updates generations` to list published tags.")
}
