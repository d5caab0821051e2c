//! Purpose: Consume concrete types only through a minimal capability trait.
//! Exports: `SomeInterface`, `SomeClass`, `FixedClass`, `use_some_class`.
//! Role: Concrete types may change freely without re-versioning the consumer.
//! Invariants: `use_some_class` output depends only on `f1` and `f2`.
//! Invariants: `SomeInterface` stays object safe and never grows required methods.

/// Minimal, version-stable operation set.
pub trait SomeInterface {
    fn f1(&self) -> i32;
    fn f2(&self) -> i32;
}

impl<T: SomeInterface + ?Sized> SomeInterface for &T {
    fn f1(&self) -> i32 {
        (**self).f1()
    }

    fn f2(&self) -> i32 {
        (**self).f2()
    }
}

impl<T: SomeInterface + ?Sized> SomeInterface for Box<T> {
    fn f1(&self) -> i32 {
        (**self).f1()
    }

    fn f2(&self) -> i32 {
        (**self).f2()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SomeClass {
    a: i32,
    b: i32,
}

impl SomeClass {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    // Not part of the capability; consumers never depend on it.
    pub fn sum(&self) -> i64 {
        i64::from(self.a) + i64::from(self.b)
    }
}

impl SomeInterface for SomeClass {
    fn f1(&self) -> i32 {
        self.a
    }

    fn f2(&self) -> i32 {
        self.b
    }
}

/// Constant implementation; stands in for any other conforming type.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedClass;

impl FixedClass {
    pub const F1: i32 = 1;
    pub const F2: i32 = 2;
}

impl SomeInterface for FixedClass {
    fn f1(&self) -> i32 {
        Self::F1
    }

    fn f2(&self) -> i32 {
        Self::F2
    }
}

pub fn use_some_class(instance: &dyn SomeInterface) -> String {
    let (f1, f2) = (instance.f1(), instance.f2());
    tracing::debug!(f1, f2, "use_some_class");
    format!("use_some_class: f1: {f1}, f2: {f2}")
}
