//! RxOptional - an Optional container that bridges into async streams
//!
//! This module provides the container itself: construction, fluent
//! combinators, presence-gated side effects, equality semantics and the
//! conversion boundary into `Observable` / `Single`.

use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::{self, StreamExt};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::future::Future;
use std::hash::{Hash, Hasher};

use crate::error::{OptionalError, OptionalResult};
use crate::observable::{Observable, RxStream};
use crate::observer::{run_observer, ObserverOutcome};
use crate::rx_configuration::ObserverConfig;
use crate::single::Single;

/// A container holding at most one value.
///
/// Every combinator returns a new container; presence is decided once, at
/// construction, and never re-validated.
///
/// With `serde` the container is a sequence of zero or one element, so
/// `of(empty())` and `empty()` stay distinct at any nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct RxOptional<T> {
    value: Option<T>,
}

// ================================
// Construction
// ================================

impl<T> RxOptional<T> {
    /// The canonical empty container
    pub fn empty() -> Self {
        RxOptional { value: None }
    }

    /// Wrap a value that is known to be present
    pub fn of(value: T) -> Self {
        RxOptional { value: Some(value) }
    }

    /// Wrap a value that must be present, failing with `InvalidArgument` otherwise
    pub fn try_of(value: Option<T>) -> OptionalResult<Self> {
        value.map(Self::of).ok_or_else(|| OptionalError::missing("value"))
    }

    /// Wrap a possibly absent value; absence yields the empty container
    pub fn of_nullable(value: Option<T>) -> Self {
        RxOptional { value }
    }

    /// Alias of [`RxOptional::of_nullable`] for accessor-style APIs
    pub fn maybe(value: Option<T>) -> Self {
        Self::of_nullable(value)
    }

    /// Take the first element of a stream, if there is one
    pub async fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T>,
    {
        pin_mut!(stream);
        Self::of_nullable(stream.next().await)
    }
}

// ================================
// Presence and extraction
// ================================

impl<T> RxOptional<T> {
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Borrow the payload, failing with `EmptyValueAccess` when absent
    pub fn get(&self) -> OptionalResult<&T> {
        self.value.as_ref().ok_or(OptionalError::EmptyValueAccess)
    }

    /// Take the payload, failing with `EmptyValueAccess` when absent
    pub fn into_value(self) -> OptionalResult<T> {
        self.value.ok_or(OptionalError::EmptyValueAccess)
    }

    pub fn as_ref(&self) -> RxOptional<&T> {
        RxOptional { value: self.value.as_ref() }
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }

    pub fn iter(&self) -> std::option::Iter<'_, T> {
        self.value.iter()
    }
}

// ================================
// Transformation combinators
// ================================

impl<T> RxOptional<T> {
    /// Keep the value only if `predicate` holds
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        let value = match self.value {
            Some(value) => value,
            None => return Self::empty(),
        };
        if predicate(&value) {
            Self::of(value)
        } else {
            Self::empty()
        }
    }

    /// Like [`RxOptional::filter`], validating the predicate on the present path only
    pub fn try_filter<P>(self, predicate: Option<P>) -> OptionalResult<Self>
    where
        P: FnOnce(&T) -> bool,
    {
        if self.is_empty() {
            return Ok(self);
        }
        let predicate = predicate.ok_or_else(|| OptionalError::missing("predicate"))?;
        Ok(self.filter(predicate))
    }

    /// Transform the payload; an empty container never invokes `mapper`
    pub fn map<U, F>(self, mapper: F) -> RxOptional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.value {
            Some(value) => RxOptional::of(mapper(value)),
            None => RxOptional::empty(),
        }
    }

    /// Checked map.
    ///
    /// The mapper is validated only when a value is present. A mapper that
    /// produces `None` is rejected with `InvalidArgument`: `map` never
    /// degrades a present container into an empty one. Use
    /// [`RxOptional::flat_map`] with [`RxOptional::of_nullable`] for that.
    pub fn try_map<U, F>(self, mapper: Option<F>) -> OptionalResult<RxOptional<U>>
    where
        F: FnOnce(T) -> Option<U>,
    {
        let value = match self.value {
            Some(value) => value,
            None => return Ok(RxOptional::empty()),
        };
        let mapper = mapper.ok_or_else(|| OptionalError::missing("mapper"))?;
        mapper(value)
            .map(RxOptional::of)
            .ok_or_else(|| {
                OptionalError::InvalidArgument("mapper returned an absent value".to_string())
            })
    }

    /// Transform the payload into another container, returned as-is
    pub fn flat_map<U, F>(self, mapper: F) -> RxOptional<U>
    where
        F: FnOnce(T) -> RxOptional<U>,
    {
        match self.value {
            Some(value) => mapper(value),
            None => RxOptional::empty(),
        }
    }

    /// Like [`RxOptional::flat_map`], validating the mapper on the present path only
    pub fn try_flat_map<U, F>(self, mapper: Option<F>) -> OptionalResult<RxOptional<U>>
    where
        F: FnOnce(T) -> RxOptional<U>,
    {
        if self.is_empty() {
            return Ok(RxOptional::empty());
        }
        let mapper = mapper.ok_or_else(|| OptionalError::missing("mapper"))?;
        Ok(self.flat_map(mapper))
    }

    /// Asynchronous [`RxOptional::map`]
    pub async fn map_async<U, F, Fut>(self, mapper: F) -> RxOptional<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self.value {
            Some(value) => RxOptional::of(mapper(value).await),
            None => RxOptional::empty(),
        }
    }

    /// Asynchronous [`RxOptional::filter`]
    pub async fn filter_async<P, Fut>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        match self.value {
            Some(value) => {
                if predicate(&value).await {
                    Self::of(value)
                } else {
                    Self::empty()
                }
            }
            None => Self::empty(),
        }
    }

    /// Asynchronous [`RxOptional::flat_map`]
    pub async fn flat_map_async<U, F, Fut>(self, mapper: F) -> RxOptional<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = RxOptional<U>>,
    {
        match self.value {
            Some(value) => mapper(value).await,
            None => RxOptional::empty(),
        }
    }
}

impl<T> RxOptional<RxOptional<T>> {
    /// Remove one level of nesting
    pub fn flatten(self) -> RxOptional<T> {
        self.flat_map(|inner| inner)
    }
}

// ================================
// Fallbacks
// ================================

impl<T> RxOptional<T> {
    /// Fall back to `other` while staying inside the container
    pub fn or(self, other: Option<T>) -> Self {
        if self.is_present() {
            self
        } else {
            Self::of_nullable(other)
        }
    }

    /// Lazy [`RxOptional::or`]; `supplier` runs only when empty
    pub fn or_get<S>(self, supplier: S) -> Self
    where
        S: FnOnce() -> Option<T>,
    {
        if self.is_present() {
            self
        } else {
            Self::of_nullable(supplier())
        }
    }

    /// The payload, or `other` verbatim
    pub fn or_else(self, other: T) -> T {
        self.value.unwrap_or(other)
    }

    /// The payload, or whatever `supplier` produces
    pub fn or_else_get<S>(self, supplier: S) -> T
    where
        S: FnOnce() -> T,
    {
        self.value.unwrap_or_else(supplier)
    }

    /// Like [`RxOptional::or_else_get`], validating the supplier only when empty
    pub fn try_or_else_get<S>(self, supplier: Option<S>) -> OptionalResult<T>
    where
        S: FnOnce() -> T,
    {
        match self.value {
            Some(value) => Ok(value),
            None => supplier
                .map(|supply| supply())
                .ok_or_else(|| OptionalError::missing("supplier")),
        }
    }

    /// The payload, or the error built by `err`
    pub fn or_else_err<E, F>(self, err: F) -> Result<T, E>
    where
        F: FnOnce() -> E,
    {
        self.value.ok_or_else(err)
    }
}

// ================================
// Presence-gated side effects
// ================================

impl<T> RxOptional<T> {
    /// Run `consumer` with the payload if present.
    ///
    /// A panicking or failing consumer is logged and ignored; the receiver is
    /// always returned so `if_not_present` can follow.
    ///
    /// The consumer must return `()` or `Result<(), E>` (see [`ObserverOutcome`]).
    /// A closure ending in a value-returning call such as `set.insert(*v)`
    /// needs a trailing `;` to discard that value.
    pub fn if_present<C, R>(&self, consumer: C) -> &Self
    where
        C: FnOnce(&T) -> R,
        R: ObserverOutcome,
    {
        self.if_present_with(&ObserverConfig::default(), consumer)
    }

    pub fn if_present_with<C, R>(&self, config: &ObserverConfig, consumer: C) -> &Self
    where
        C: FnOnce(&T) -> R,
        R: ObserverOutcome,
    {
        if let Some(value) = &self.value {
            run_observer(config, || consumer(value));
        }
        self
    }

    /// Like [`RxOptional::if_present`], validating the consumer on the present path only
    pub fn try_if_present<C, R>(&self, consumer: Option<C>) -> OptionalResult<&Self>
    where
        C: FnOnce(&T) -> R,
        R: ObserverOutcome,
    {
        if self.is_empty() {
            return Ok(self);
        }
        let consumer = consumer.ok_or_else(|| OptionalError::missing("consumer"))?;
        Ok(self.if_present(consumer))
    }

    /// Run `action` if empty, with the same failure isolation as `if_present`
    pub fn if_not_present<A, R>(&self, action: A) -> &Self
    where
        A: FnOnce() -> R,
        R: ObserverOutcome,
    {
        self.if_not_present_with(&ObserverConfig::default(), action)
    }

    pub fn if_not_present_with<A, R>(&self, config: &ObserverConfig, action: A) -> &Self
    where
        A: FnOnce() -> R,
        R: ObserverOutcome,
    {
        if self.is_empty() {
            run_observer(config, action);
        }
        self
    }

    /// Like [`RxOptional::if_not_present`], validating the action on the absent path only
    pub fn try_if_not_present<A, R>(&self, action: Option<A>) -> OptionalResult<&Self>
    where
        A: FnOnce() -> R,
        R: ObserverOutcome,
    {
        if self.is_present() {
            return Ok(self);
        }
        let action = action.ok_or_else(|| OptionalError::missing("action"))?;
        Ok(self.if_not_present(action))
    }
}

// ================================
// Stream boundary
// ================================

impl<T> RxOptional<T>
where
    T: Send + 'static,
{
    /// A restartable Observable emitting the payload, or nothing, then completing
    pub fn to_observable(&self) -> Observable<T>
    where
        T: Clone + Sync,
    {
        self.clone().into_observable()
    }

    pub fn into_observable(self) -> Observable<T>
    where
        T: Clone + Sync,
    {
        match self.value {
            Some(value) => Observable::just(value),
            None => Observable::empty(),
        }
    }

    /// A one-shot stream of zero or one element
    pub fn into_stream(self) -> RxStream<T> {
        stream::iter(self.value).boxed()
    }

    /// A Single yielding the payload, or failing with `EmptyValueAccess`
    pub fn to_single(&self) -> Single<T>
    where
        T: Clone + Sync,
    {
        Single::from_optional(self.clone())
    }
}

// ================================
// Equality, hashing, display
// ================================

impl<T: PartialEq> PartialEq for RxOptional<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for RxOptional<T> {}

impl<T: Hash> Hash for RxOptional<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.value {
            Some(value) => value.hash(state),
            None => 0i32.hash(state),
        }
    }
}

impl<T: fmt::Display> fmt::Display for RxOptional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "Optional[{}]", value),
            None => write!(f, "Optional[empty]"),
        }
    }
}

// ================================
// Conversions
// ================================

impl<T> Default for RxOptional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for RxOptional<T> {
    fn from(value: Option<T>) -> Self {
        Self::of_nullable(value)
    }
}

impl<T> From<RxOptional<T>> for Option<T> {
    fn from(optional: RxOptional<T>) -> Self {
        optional.value
    }
}

impl<T> IntoIterator for RxOptional<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RxOptional<T> {
    type Item = &'a T;
    type IntoIter = std::option::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.iter()
    }
}

// ================================
// Serialization
// ================================

impl<T: Serialize> Serialize for RxOptional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.value.iter().len()))?;
        if let Some(value) = &self.value {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for RxOptional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(OptionalVisitor(PhantomData))
    }
}

struct OptionalVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalVisitor<T> {
    type Value = RxOptional<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of at most one element")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let value = seq.next_element::<T>()?;
        if value.is_some() && seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(<A::Error as de::Error>::invalid_length(2, &self));
        }
        Ok(RxOptional::of_nullable(value))
    }
}
