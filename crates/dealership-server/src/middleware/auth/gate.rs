//! Ordered request gates applied in front of route handlers.

use std::fmt;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};

use crate::handler::Result;
use crate::service::ServiceState;
use crate::utility::TRACING_TARGET_AUTHORIZATION as TRACING_TARGET;

/// A single admission check run before the handler.
///
/// A gate either lets the request continue, possibly after attaching data to
/// its extensions, or rejects it with an error response.
#[async_trait::async_trait]
pub trait Gate: Send + Sync + 'static {
    /// Name used in logs when this gate rejects a request.
    fn name(&self) -> &'static str;

    /// Admits or rejects `request`.
    async fn check(&self, request: &mut Request, state: &ServiceState) -> Result<()>;
}

/// Ordered list of named gates.
///
/// Gates run in insertion order and the first rejection short-circuits the
/// rest and the handler.
#[derive(Clone, Default)]
pub struct GatePipeline {
    gates: Vec<Arc<dyn Gate>>,
}

impl GatePipeline {
    /// Creates an empty pipeline that admits everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a gate.
    pub fn gate(mut self, gate: impl Gate) -> Self {
        self.gates.push(Arc::new(gate));
        self
    }

    /// Requires a verified bearer token.
    pub fn authenticated() -> Self {
        Self::new().gate(super::Authenticate)
    }

    /// Requires a verified bearer token issued to an administrator.
    pub fn administrator() -> Self {
        Self::authenticated().gate(super::RequireAdmin)
    }

    /// Returns the gate names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.gates.iter().map(|gate| gate.name()).collect()
    }

    /// Runs every gate in order, stopping at the first rejection.
    pub async fn run(&self, request: &mut Request, state: &ServiceState) -> Result<()> {
        for gate in &self.gates {
            if let Err(error) = gate.check(request, state).await {
                tracing::debug!(
                    target: TRACING_TARGET,
                    gate = gate.name(),
                    method = %request.method(),
                    path = request.uri().path(),
                    status = %error.kind().status_code(),
                    "request rejected"
                );
                return Err(error);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for GatePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// State of the pipeline middleware.
#[derive(Clone)]
pub struct PipelineState {
    service: ServiceState,
    pipeline: Arc<GatePipeline>,
}

/// Middleware running a [`GatePipeline`] before the wrapped handler.
pub async fn run_pipeline(
    State(state): State<PipelineState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Err(error) = state.pipeline.run(&mut request, &state.service).await {
        return error.into_response();
    }

    next.run(request).await
}

/// Extension trait for `axum::`[`Router`] to guard its routes with gates.
pub trait RouterGateExt {
    /// Runs `pipeline` in front of every route registered so far.
    ///
    /// Applied as a route layer, so unmatched requests still reach the
    /// fallback untouched. The router must already contain routes.
    fn with_gates(self, state: &ServiceState, pipeline: GatePipeline) -> Self;
}

impl RouterGateExt for Router<ServiceState> {
    fn with_gates(self, state: &ServiceState, pipeline: GatePipeline) -> Self {
        let state = PipelineState {
            service: state.clone(),
            pipeline: Arc::new(pipeline),
        };

        self.route_layer(from_fn_with_state(state, run_pipeline))
    }
}
