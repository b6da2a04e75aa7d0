//! Single - a deferred computation producing exactly one value or an error

use futures::future::{self, BoxFuture, FutureExt};
use futures_util::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;

use crate::error::{OptionalError, OptionalResult};
use crate::observable::Observable;
use crate::optional::RxOptional;

/// A restartable deferred value: each subscription re-runs the source
pub struct Single<T> {
    source: Arc<dyn Fn() -> BoxFuture<'static, OptionalResult<T>> + Send + Sync + 'static>,
}

impl<T> Clone for Single<T> {
    fn clone(&self) -> Self {
        Single {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T> Single<T>
where
    T: Send + 'static,
{
    /// Create a single from a future factory
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = OptionalResult<T>> + Send + 'static,
    {
        Single {
            source: Arc::new(move || f().boxed()),
        }
    }

    pub fn just(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Single::new(move || future::ready(Ok(value.clone())))
    }

    pub fn error(err: OptionalError) -> Self {
        Single::new(move || future::ready(Err(err.clone())))
    }

    /// Succeeds with the payload, or fails with `EmptyValueAccess` when empty
    pub fn from_optional(optional: RxOptional<T>) -> Self
    where
        T: Clone + Sync,
    {
        Single::new(move || future::ready(optional.clone().into_value()))
    }

    /// Run the source once
    pub async fn subscribe(&self) -> OptionalResult<T> {
        (self.source)().await
    }

    /// Run the source once, handing a success to `on_value`
    pub async fn subscribe_with<F>(&self, on_value: F) -> OptionalResult<()>
    where
        F: FnOnce(T),
    {
        let value = self.subscribe().await?;
        on_value(value);
        Ok(())
    }

    /// Block the calling thread until the value is ready
    pub fn blocking_get(&self) -> OptionalResult<T> {
        futures::executor::block_on(self.subscribe())
    }

    pub fn map<U, F>(self, f: F) -> Single<U>
    where
        F: Fn(T) -> U + Send + Sync + Clone + 'static,
        U: Send + 'static,
    {
        Single::new(move || {
            let f = f.clone();
            self.subscribe_owned().map(move |result| result.map(f))
        })
    }

    pub fn flat_map<U, F>(self, f: F) -> Single<U>
    where
        F: Fn(T) -> Single<U> + Send + Sync + Clone + 'static,
        U: Send + 'static,
    {
        Single::new(move || {
            let f = f.clone();
            let upstream = self.subscribe_owned();
            async move {
                let value = upstream.await?;
                f(value).subscribe().await
            }
        })
    }

    /// Keep the value only if `predicate` holds; a rejected value becomes an empty container
    pub fn filter<F>(self, predicate: F) -> Single<RxOptional<T>>
    where
        F: Fn(&T) -> bool + Send + Sync + Clone + 'static,
    {
        Single::new(move || {
            let predicate = predicate.clone();
            self.subscribe_owned().map(move |result| {
                result.map(|value| RxOptional::of(value).filter(|v| predicate(v)))
            })
        })
    }

    /// Emit the value and complete; an error is logged and completes the stream empty
    pub fn to_observable(&self) -> Observable<T> {
        let single = self.clone();
        Observable::new(move || {
            stream::once(single.subscribe_owned())
                .filter_map(|result| {
                    future::ready(match result {
                        Ok(value) => Some(value),
                        Err(e) => {
                            log::warn!("Single failed, completing observable empty: {}", e);
                            None
                        }
                    })
                })
                .boxed()
        })
    }

    fn subscribe_owned(&self) -> BoxFuture<'static, OptionalResult<T>> {
        (self.source)()
    }
}
