use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The domain module (social) implements this; the binary entry point
/// collects modules and merges their routes into a single Router next
/// to the system endpoints.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's complete routes, ready to merge.
    fn routes(&self) -> Router;
}
