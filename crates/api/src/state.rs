use jobrelay_engine::JobEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the engine shares its internals.
#[derive(Clone)]
pub struct AppState {
    /// Job lifecycle engine.
    pub engine: JobEngine,
}
