use std::any::Any;
use std::sync::Arc;

/// Opaque handle to a transaction owned by the instrumentation layer.
///
/// The store never looks inside a transaction; it only parks the handle for
/// the duration of the unit of work. Handles are cheap to clone and compare
/// by identity, so the same transaction re-read from the store is `==` to
/// the handle that was stored.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct TransactionRef {
    #[derivative(Debug = "ignore")]
    inner: Arc<dyn Any + Send + Sync>,
}

impl TransactionRef {
    pub fn new<T>(transaction: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(transaction),
        }
    }

    /// Read the wrapped transaction back, if `T` is the type it was
    /// constructed with.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl PartialEq for TransactionRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TransactionRef {}

/// Opaque handle to a span owned by the instrumentation layer.
///
/// Same contract as [`TransactionRef`]: identity equality, cheap clones, the
/// payload stays invisible to the store.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct SpanRef {
    #[derivative(Debug = "ignore")]
    inner: Arc<dyn Any + Send + Sync>,
}

impl SpanRef {
    pub fn new<T>(span: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(span),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl PartialEq for SpanRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for SpanRef {}
