//! Response header policies applied to every page.

use actix_web::middleware::DefaultHeaders;

/// Scripts may come from this origin and the front-end CDNs the layout is
/// allowed to pull from.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' code.jquery.com cdn.jsdelivr.net pro.fontawesome.com; \
     style-src 'self' 'unsafe-inline' cdn.jsdelivr.net pro.fontawesome.com; \
     font-src 'self' pro.fontawesome.com; \
     img-src 'self' data:; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'self'";

/// Pages depend on the session, so shared caches must not keep them.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Headers added to responses that do not already set them.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", CONTENT_SECURITY_POLICY))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE))
}
