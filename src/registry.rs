//! Handler registry for the flatroute binary's route set.

use crate::handlers;
use crate::router::RouteTable;
use http::Method;

/// Register every route served by the binary.
///
/// # Safety
///
/// Registration spawns handler coroutines via `may`; the caller must have
/// configured the may runtime first.
pub unsafe fn register_all(table: &mut RouteTable) {
    unsafe {
        table.register(Method::GET, "/", handlers::index::handler);
        table.register(Method::GET, "/about", handlers::about::handler);
        table.register(Method::GET, "/contact", handlers::contact::handler);
        table.register(Method::GET, "/products", handlers::products::handler);
        table.register(
            Method::POST,
            "/create-product",
            handlers::create_product::handler,
        );
    }
}
