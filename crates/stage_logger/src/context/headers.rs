use ::http::{HeaderMap, Request};

use super::{Context, RequestContext};

impl RequestContext for HeaderMap {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.to_str().ok())
    }
}

/// A non-empty value in a [`Context`] stored in the request extensions
/// wins over headers of the same name.
impl<B> RequestContext for Request<B> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.extensions()
            .get::<Context>()
            .and_then(|ctx| ctx.get(key))
            .filter(|v| !v.is_empty())
            .or_else(|| self.headers().lookup(key))
    }
}
