//! Observable values: a current value plus the listeners that react to it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

/// Identifies a listener registered on an [`Observable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: RwLock<T>,
    listeners: Mutex<Vec<(ListenerId, Listener<T>)>>,
    next_id: AtomicU64,
}

/// Holder of a value that notifies listeners synchronously when it changes.
///
/// Clones share the same value and listener list. Setting a value equal to the
/// current one does not notify anyone.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.read())
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Stores `value` and, if it differs from the previous value, calls every listener.
    ///
    /// Listeners run after both locks are released, so they may read or even set
    /// this observable again. A nested `set` notifies before the outer one
    /// finishes, so listeners that need the latest value should call [`get`](Self::get)
    /// rather than trust their argument.
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.write();
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&value);
        }
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered (or was already removed).
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// A handle that does not keep the value alive, for use inside its own listeners.
    pub fn downgrade(&self) -> WeakObservable<T> {
        WeakObservable { inner: Arc::downgrade(&self.inner) }
    }
}

/// Non-owning handle to an [`Observable`].
pub struct WeakObservable<T> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for WeakObservable<T> {
    fn clone(&self) -> Self {
        Self { inner: Weak::clone(&self.inner) }
    }
}

impl<T> WeakObservable<T> {
    /// `None` once every [`Observable`] handle has been dropped.
    pub fn upgrade(&self) -> Option<Observable<T>> {
        self.inner.upgrade().map(|inner| Observable { inner })
    }
}

/// Tracks listeners added through it so they can all be detached at once.
#[derive(Default)]
pub struct ListenerRegistry {
    detachers: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `listener` to `observable` and remembers how to remove it.
    pub fn listen<T, F>(&self, observable: &Observable<T>, listener: F) -> ListenerId
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = observable.add_listener(listener);
        let handle = observable.clone();
        self.detachers.lock().push(Box::new(move || {
            handle.remove_listener(id);
        }));
        id
    }

    /// Detaches every listener registered through this registry.
    pub fn cancel_listeners(&self) {
        let detachers: Vec<_> = self.detachers.lock().drain(..).collect();
        for detach in detachers {
            detach();
        }
    }

    pub fn len(&self) -> usize {
        self.detachers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry").field("listeners", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_set_notifies_with_new_value() {
        let observable = Observable::new(false);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        observable.add_listener(move |v: &bool| sink.lock().push(*v));

        observable.set(true);
        observable.set(false);

        assert_eq!(*seen.lock(), vec![true, false]);
        assert!(!observable.get());
    }

    #[test]
    fn test_set_same_value_does_not_notify() {
        let observable = Observable::new("dark".to_string());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        observable.add_listener(move |_: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        observable.set("dark".to_string());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        observable.set("light".to_string());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_listener() {
        let observable = Observable::new(0usize);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = observable.add_listener(move |_: &usize| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(observable.remove_listener(id));
        assert!(!observable.remove_listener(id));
        observable.set(5);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(observable.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_read_observable() {
        let observable = Observable::new(1u32);
        let handle = observable.clone();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        observable.add_listener(move |_: &u32| *sink.lock() = Some(handle.get()));

        observable.set(2);
        assert_eq!(*seen.lock(), Some(2));
    }

    #[test]
    fn test_nested_set_is_visible_to_later_listeners() {
        let observable = Observable::new(true);
        let corrector = observable.clone();
        observable.add_listener(move |v: &bool| {
            if !*v {
                corrector.set(true);
            }
        });
        let weak = observable.downgrade();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        observable.add_listener(move |_: &bool| {
            if let Some(current) = weak.upgrade() {
                sink.lock().push(current.get());
            }
        });

        observable.set(false);

        assert!(observable.get());
        assert_eq!(*seen.lock(), vec![true, true]);
    }

    #[test]
    fn test_weak_handle_does_not_keep_value_alive() {
        let observable = Observable::new(3u8);
        let weak = observable.downgrade();
        assert_eq!(weak.upgrade().map(|o| o.get()), Some(3));

        drop(observable);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_registry_cancels_all_listeners() {
        let a = Observable::new(false);
        let b = Observable::new(0i64);
        let registry = ListenerRegistry::new();
        registry.listen(&a, |_| {});
        registry.listen(&b, |_| {});
        assert_eq!(registry.len(), 2);
        assert_eq!(a.listener_count(), 1);

        registry.cancel_listeners();
        assert!(registry.is_empty());
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
    }
}
