//! Nested composite objects whose fields are read through containers.
#![allow(dead_code)]

use rx_optional::RxOptional;

#[derive(Debug, Clone, Default)]
pub struct Outer {
    id: Option<String>,
    inner: Option<Inner>,
}

impl Outer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_inner(mut self, inner: Inner) -> Self {
        self.inner = Some(inner);
        self
    }

    pub fn id(&self) -> RxOptional<String> {
        RxOptional::maybe(self.id.clone())
    }

    pub fn inner(&self) -> RxOptional<Inner> {
        RxOptional::maybe(self.inner.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Inner {
    id: Option<String>,
}

impl Inner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn id(&self) -> RxOptional<String> {
        RxOptional::maybe(self.id.clone())
    }
}

/// A holder for a possibly absent value
#[derive(Debug, Clone, PartialEq)]
pub struct TestObject<T> {
    value: Option<T>,
}

impl<T: Clone> TestObject<T> {
    pub fn new(value: Option<T>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Option<T> {
        self.value.clone()
    }
}
