//! # Backend layer
//!
//! A backend is pluggable logic that the dispatcher forwards calls to. It owns
//! no storage: everything it reads or writes goes through the
//! [`CallContext`] it is handed, which points at the dispatcher's storage and
//! reports the original caller.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Backend`] uses native `async fn` so concrete backends compile to plain
//! futures. The dispatcher keeps heterogeneous backends in one table through
//! [`DynBackend`], which every `Backend` implements automatically.

use crate::{
    calldata::Output,
    context::CallContext,
    error::Revert,
    storage::StorageSchema,
};
use futures::future::BoxFuture;
use std::{future::Future, sync::Arc};

/// Pluggable logic invoked through the dispatcher.
///
/// # Storage
///
/// Implementations should derive every slot from their
/// [`schema`](Backend::schema) namespace. Backends that share a namespace share
/// state; keeping unrelated backends apart is the operator's job.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatcher backend",
    label = "missing `Backend` implementation",
    note = "Implement `Backend::invoke` to handle forwarded calls."
)]
pub trait Backend: Send + Sync + 'static {
    /// Handle one forwarded call.
    ///
    /// Returning `Err` discards every write and log staged on `ctx`.
    fn invoke(
        &self,
        ctx: &mut CallContext<'_>,
    ) -> impl Future<Output = Result<Output, Revert>> + Send;

    /// Storage layout this backend expects.
    fn schema(&self) -> StorageSchema;
}

/// Object-safe version of [`Backend`].
pub trait DynBackend: Send + Sync + 'static {
    /// Handle one forwarded call (dynamic dispatch version).
    fn invoke_dyn<'a, 'b>(
        &'a self,
        ctx: &'a mut CallContext<'b>,
    ) -> BoxFuture<'a, Result<Output, Revert>>
    where
        'b: 'a;

    /// Storage layout this backend expects.
    fn schema_dyn(&self) -> StorageSchema;
}

// Blanket implementation: every Backend is usable as a DynBackend.
impl<T: Backend> DynBackend for T {
    fn invoke_dyn<'a, 'b>(
        &'a self,
        ctx: &'a mut CallContext<'b>,
    ) -> BoxFuture<'a, Result<Output, Revert>>
    where
        'b: 'a,
    {
        Box::pin(self.invoke(ctx))
    }

    fn schema_dyn(&self) -> StorageSchema {
        self.schema()
    }
}

/// A shared, type-erased backend.
pub type SharedBackend = Arc<dyn DynBackend>;

#[cfg(test)]
mod tests {
    use super::{Backend, SharedBackend};
    use crate::{
        calldata::{Call, Output},
        context::CallContext,
        error::Revert,
        primitives::Address,
        storage::{StateStore, StorageSchema},
    };
    use std::sync::Arc;

    struct WhoAmI;

    impl Backend for WhoAmI {
        async fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<Output, Revert> {
            Ok(Output::word(ctx.caller()))
        }

        fn schema(&self) -> StorageSchema {
            StorageSchema::new("whoami")
        }
    }

    #[tokio::test]
    async fn boxed_backend_sees_caller() {
        let backend: SharedBackend = Arc::new(WhoAmI);
        let storage = StateStore::new();
        let call = Call::signature(Address::repeat_byte(3), "whoami()");
        let mut ctx = CallContext::new(Address::repeat_byte(1), Address::repeat_byte(2), &call, &storage);

        let out = backend.invoke_dyn(&mut ctx).await.unwrap();
        assert_eq!(out.as_address(), Some(Address::repeat_byte(3)));
        assert_eq!(backend.schema_dyn().namespace, "whoami");
    }
}
