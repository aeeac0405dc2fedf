// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Asynchronous creation of worlds.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::{error::WorldResult, scope::ScopeNode};

/// Request to create a world for a scope.
#[derive(Debug)]
pub struct WorldRequest<'a, W> {
    /// Scope the world is created for.
    pub scope: &'a ScopeNode,

    /// World of an enclosing scope to compose the new one from, if any.
    ///
    /// Nothing is inherited implicitly: a factory decides what to take from
    /// it.
    pub parent: Option<&'a W>,
}

/// Creates a fresh world of type `W` for every request.
///
/// Implemented for functions returning a [`LocalBoxFuture`]:
/// ```rust
/// # use cucumber_plan::{WorldFactory, WorldRequest, error::WorldResult};
/// # use futures::future::LocalBoxFuture;
/// #
/// fn named_after_scope(
///     req: WorldRequest<'_, String>,
/// ) -> LocalBoxFuture<'_, WorldResult<String>> {
///     Box::pin(async move { Ok(req.scope.name.clone()) })
/// }
///
/// fn assert_factory(_: impl WorldFactory<String>) {}
///
/// assert_factory(named_after_scope);
/// ```
#[async_trait(?Send)]
pub trait WorldFactory<W: 'static> {
    /// Creates a new world.
    ///
    /// # Errors
    ///
    /// If the world can't be created.
    async fn create(&self, request: WorldRequest<'_, W>) -> WorldResult<W>;
}

#[async_trait(?Send)]
impl<W, F> WorldFactory<W> for F
where
    W: 'static,
    F: for<'a> Fn(WorldRequest<'a, W>) -> LocalBoxFuture<'a, WorldResult<W>>,
{
    async fn create(&self, request: WorldRequest<'_, W>) -> WorldResult<W> {
        self(request).await
    }
}
