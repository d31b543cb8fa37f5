use std::collections::HashMap;

use super::{RequestContext, TRACE_ID_KEY, USER_ID_KEY};

/// Owned, immutable key-value carrier for request-scoped values.
///
/// Built once when a request enters the process and passed by reference
/// down to whatever logs on its behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this context with `key` set to `value`.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        self.with_value(TRACE_ID_KEY, trace_id)
    }

    pub fn with_user_id(self, user_id: impl Into<String>) -> Self {
        self.with_value(USER_ID_KEY, user_id)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl RequestContext for Context {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_well_known_keys() {
        let ctx = Context::new().with_trace_id("abc123").with_user_id("42");
        assert_eq!(ctx.get(TRACE_ID_KEY), Some("abc123"));
        assert_eq!(ctx.get(USER_ID_KEY), Some("42"));
    }

    #[test]
    fn test_later_value_wins() {
        let ctx = Context::new().with_trace_id("first").with_trace_id("second");
        assert_eq!(ctx.lookup(TRACE_ID_KEY), Some("second"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let ctx: Context = [("tenant", "acme"), (USER_ID_KEY, "bob")].into_iter().collect();
        assert_eq!(ctx.get("tenant"), Some("acme"));
        assert_eq!(ctx.get(USER_ID_KEY), Some("bob"));
        assert!(!ctx.is_empty());
        assert!(Context::new().is_empty());
    }
}
