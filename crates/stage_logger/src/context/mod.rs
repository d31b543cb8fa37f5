//! Request-scoped lookup of correlation identifiers.
//!
//! A [`RequestContext`] is anything that can answer "what value is stored
//! under this key". The logger only ever reads from it, once per
//! context-aware call.

mod carrier;
mod headers;

pub use carrier::Context;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Key holding the trace identifier of the current request.
pub const TRACE_ID_KEY: &str = "trace-id";

/// Key holding the identifier of the user the request acts for.
pub const USER_ID_KEY: &str = "user-id";

/// Read-only key-value lookup capability.
pub trait RequestContext {
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// Value stored under `key`, or `""` when it is missing or empty.
pub fn value_or_empty<'a, C: RequestContext + ?Sized>(ctx: &'a C, key: &str) -> &'a str {
    ctx.lookup(key).filter(|v| !v.is_empty()).unwrap_or("")
}

pub fn trace_id<C: RequestContext + ?Sized>(ctx: &C) -> &str {
    value_or_empty(ctx, TRACE_ID_KEY)
}

pub fn user_id<C: RequestContext + ?Sized>(ctx: &C) -> &str {
    value_or_empty(ctx, USER_ID_KEY)
}

impl RequestContext for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl RequestContext for HashMap<&str, &str> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

impl RequestContext for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: RequestContext + ?Sized> RequestContext for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl<T: RequestContext + ?Sized> RequestContext for Arc<T> {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl<T: RequestContext + ?Sized> RequestContext for Box<T> {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_map_to_empty() {
        let ctx: HashMap<String, String> = HashMap::new();
        assert_eq!(trace_id(&ctx), "");
        assert_eq!(user_id(&ctx), "");
    }

    #[test]
    fn test_empty_value_maps_to_empty() {
        let mut ctx = BTreeMap::new();
        ctx.insert(TRACE_ID_KEY.to_string(), String::new());
        ctx.insert(USER_ID_KEY.to_string(), "alice".to_string());
        assert_eq!(trace_id(&ctx), "");
        assert_eq!(user_id(&ctx), "alice");
    }

    #[test]
    fn test_borrowed_map() {
        let ctx = HashMap::from([(TRACE_ID_KEY, "abc123")]);
        assert_eq!(trace_id(&ctx), "abc123");
        assert_eq!(user_id(&ctx), "");
    }

    #[test]
    fn test_trait_object_and_smart_pointers() {
        let ctx: Arc<dyn RequestContext> = Arc::new(Context::new().with_trace_id("t-1"));
        assert_eq!(trace_id(&ctx), "t-1");
        assert_eq!(trace_id(ctx.as_ref()), "t-1");

        let boxed: Box<dyn RequestContext> = Box::new(Context::new().with_user_id("u-1"));
        assert_eq!(user_id(&boxed), "u-1");
    }
}
