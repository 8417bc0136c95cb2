//! Merging of handler maps keyed by the same identifiers.
//!
//! [`merge`] takes several independently built maps and produces one map in
//! which handlers that share a key run one after another, each receiving the
//! previous handler's output as its state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reducer-shaped function stored in a [`HandlerMap`].
pub type Handler<S, E> = Arc<dyn Fn(S, &E) -> S + Send + Sync>;

/// Ordered mapping from key to handler.
///
/// Keys iterate in insertion order. Inserting an existing key replaces its
/// handler in place.
pub struct HandlerMap<S, E> {
    entries: Vec<(String, Handler<S, E>)>,
    index: HashMap<String, usize>,
}

impl<S, E> HandlerMap<S, E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn insert<F>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(S, &E) -> S + Send + Sync + 'static,
    {
        self.insert_handler(key, Arc::new(handler));
    }

    pub fn insert_handler(&mut self, key: impl Into<String>, handler: Handler<S, E>) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => {
                if let Some(slot) = self.entries.get_mut(pos) {
                    slot.1 = handler;
                }
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, handler));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Handler<S, E>> {
        self.index
            .get(key)
            .and_then(|&pos| self.entries.get(pos))
            .map(|(_, handler)| handler)
    }

    /// Runs the handler for `key`, or returns `None` if there is none.
    pub fn call(&self, key: &str, state: S, event: &E) -> Option<S> {
        self.get(key).map(|handler| handler(state, event))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler<S, E>)> {
        self.entries.iter().map(|(key, handler)| (key.as_str(), handler))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, E> Default for HandlerMap<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> Clone for HandlerMap<S, E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<S, E> fmt::Debug for HandlerMap<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMap")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, E, K: Into<String>> FromIterator<(K, Handler<S, E>)> for HandlerMap<S, E> {
    fn from_iter<I: IntoIterator<Item = (K, Handler<S, E>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, handler) in iter {
            map.insert_handler(key, handler);
        }
        map
    }
}

impl<S, E> IntoIterator for HandlerMap<S, E> {
    type Item = (String, Handler<S, E>);
    type IntoIter = std::vec::IntoIter<(String, Handler<S, E>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Merges `maps` into one map with a single composed handler per key.
///
/// Handlers sharing a key are applied left to right in the order they were
/// encountered: maps in sequence order, keys in each map's order. Output keys
/// follow first appearance. No maps yields an empty map.
pub fn merge<S, E, I>(maps: I) -> HandlerMap<S, E>
where
    S: 'static,
    E: 'static,
    I: IntoIterator<Item = HandlerMap<S, E>>,
{
    let mut grouped: Vec<(String, Vec<Handler<S, E>>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut sources = 0usize;

    for map in maps {
        sources += 1;
        for (key, handler) in map {
            match positions.get(&key).and_then(|&pos| grouped.get_mut(pos)) {
                Some((_, handlers)) => handlers.push(handler),
                None => {
                    positions.insert(key.clone(), grouped.len());
                    grouped.push((key, vec![handler]));
                }
            }
        }
    }

    tracing::debug!(sources, keys = grouped.len(), "merged handler maps");

    grouped
        .into_iter()
        .map(|(key, handlers)| (key, compose(handlers)))
        .collect()
}

/// Folds the state through `handlers`, all receiving the same event.
pub fn compose<S, E>(handlers: Vec<Handler<S, E>>) -> Handler<S, E>
where
    S: 'static,
    E: 'static,
{
    Arc::new(move |state: S, event: &E| {
        handlers.iter().fold(state, |acc, handler| handler(acc, event))
    })
}
