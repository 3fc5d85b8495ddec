//! Lorentz-force simulation API server
//! - REST endpoints for simulation, circular-motion validation, kinetic energy
//! - Range validation of requests before they reach the engine
//! - CPU-bound simulation work runs off the async runtime with a timeout

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use lorentz_sim::{
    circular_check, energy_report, simulate_with_cancel, CancelToken, FieldSpec, FieldSpecs,
    Integrator, ParticleSpec, SimulationInput, DEFAULT_TOLERANCE, MAX_PARTICLES,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Caller-facing request bounds, enforced before the engine runs.
const MAX_T_FINAL: f64 = 100.0;
const MIN_DT: f64 = 1e-4;

#[derive(Parser, Debug)]
#[command(name = "lorentz-server")]
#[command(about = "REST API server for Lorentz-force particle simulation")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Per-request simulation timeout in seconds
    #[arg(long, default_value = "60")]
    timeout_secs: u64,
}

#[derive(Clone)]
struct AppConfig {
    sim_timeout: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = AppConfig {
        sim_timeout: Duration::from_secs(args.timeout_secs),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/simulate", post(run_simulation))
        .route("/validate-circular", post(validate_circular))
        .route("/energy", post(energy))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Server: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Lorentz force simulation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/": "API info",
            "/health": "health check",
            "/simulate": "run a simulation (POST)",
            "/validate-circular": "check circular-motion radius (POST)",
            "/energy": "kinetic energy and speed (POST)"
        }
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "endpoint not found")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    fields: FieldSpecs,
    particles: Vec<ParticleSpec>,
    #[serde(default)]
    t0: f64,
    t_final: f64,
    dt: f64,
    #[serde(default = "default_integrator")]
    integrator: String,
}

fn default_integrator() -> String {
    "RK4".to_string()
}

async fn run_simulation(
    State(config): State<AppConfig>,
    Json(req): Json<SimulateRequest>,
) -> Response {
    if let Err(message) = check_simulate_request(&req) {
        return error_response(StatusCode::BAD_REQUEST, &message);
    }

    let integrator = match Integrator::from_name(&req.integrator) {
        Ok(i) => i,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let input = SimulationInput {
        fields: req.fields,
        particles: req.particles,
        t0: req.t0,
        t_final: req.t_final,
        dt: req.dt,
        integrator,
    };

    info!(
        particles = input.particles.len(),
        t_final = input.t_final,
        dt = input.dt,
        integrator = integrator.name(),
        "simulation request"
    );

    // The engine is CPU-bound; run it off the async runtime and arm its
    // cancellation token if the request times out.
    let cancel = CancelToken::new();
    let engine_cancel = cancel.clone();
    let task = tokio::task::spawn_blocking(move || simulate_with_cancel(&input, &engine_cancel));

    match tokio::time::timeout(config.sim_timeout, task).await {
        Ok(Ok(Ok(result))) => Json(result).into_response(),
        Ok(Ok(Err(e))) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        Ok(Err(join_err)) => {
            error!("simulation task failed: {}", join_err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
        Err(_) => {
            cancel.cancel();
            error_response(StatusCode::GATEWAY_TIMEOUT, "simulation timed out")
        }
    }
}

/// Enforce the documented request ranges; the engine assumes they hold.
fn check_simulate_request(req: &SimulateRequest) -> Result<(), String> {
    check_field_spec("E", &req.fields.e)?;
    check_field_spec("B", &req.fields.b)?;

    if !(req.t_final > req.t0) {
        return Err("t_final must be greater than t0".to_string());
    }
    if req.t_final > MAX_T_FINAL {
        return Err(format!("t_final must be at most {} s", MAX_T_FINAL));
    }
    if !(req.dt >= MIN_DT) {
        return Err(format!("dt must be at least {} s", MIN_DT));
    }
    if req.particles.len() > MAX_PARTICLES {
        return Err(format!("at most {} particles are supported", MAX_PARTICLES));
    }
    for p in &req.particles {
        if !(p.m > 0.0) {
            return Err(format!("particle {:?}: mass must be > 0", p.id));
        }
    }
    Ok(())
}

fn check_field_spec(name: &str, spec: &FieldSpec) -> Result<(), String> {
    if !(spec.magnitude >= 0.0) {
        return Err(format!("{} magnitude must be >= 0", name));
    }
    if !(0.0..=360.0).contains(&spec.angle_deg) {
        return Err(format!("{} angle_deg must be in [0, 360]", name));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CircularRequest {
    q: f64,
    m: f64,
    v: f64,
    #[serde(rename = "B")]
    b: f64,
    radius: f64,
    #[serde(default = "default_tolerance")]
    tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

async fn validate_circular(Json(req): Json<CircularRequest>) -> Response {
    if !(req.m > 0.0) {
        return error_response(StatusCode::BAD_REQUEST, "mass must be > 0");
    }
    let report = circular_check(req.q, req.m, req.v, req.b, req.radius, req.tolerance);
    Json(report).into_response()
}

#[derive(Debug, Deserialize)]
struct EnergyRequest {
    m: f64,
    #[serde(default)]
    vx: f64,
    #[serde(default)]
    vy: f64,
    #[serde(default)]
    vz: f64,
}

async fn energy(Json(req): Json<EnergyRequest>) -> Response {
    if !(req.m > 0.0) {
        return error_response(StatusCode::BAD_REQUEST, "mass must be > 0");
    }
    Json(energy_report(req.m, req.vx, req.vy, req.vz)).into_response()
}
