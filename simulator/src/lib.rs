use axum::{
    body::Bytes,
    extract::{ws::WebSocketUpgrade, Path, State as AxumState},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use kaprekar_execution::{
    roulette::{
        classify::classify,
        kaprekar::transform,
        strategy::{from_model, HitStrategy},
    },
    Session, SpinRng,
};
use kaprekar_types::{
    Group, HitModel, Progression, SessionConfig, SessionView, SpinReport,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

pub mod config;

/// Capacity of the spin report broadcast channel.
const UPDATES_CAPACITY: usize = 1024;

/// Error type for simulator operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("session lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Core(#[from] kaprekar_types::Error),
}

/// Session together with its randomness and hit strategy.
struct Table {
    session: Session,
    rng: SpinRng,
    model: HitModel,
    strategy: Box<dyn HitStrategy + Send + Sync>,
}

/// Changes applied by a reset. Missing fields keep their current value.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResetRequest {
    pub spin_window: Option<usize>,
    pub starting_bank: Option<u64>,
    pub progression: Option<Vec<u64>>,
    pub hit: Option<HitModel>,
}

#[derive(Clone)]
pub struct Simulator {
    state: Arc<RwLock<Table>>,
    update_tx: broadcast::Sender<SpinReport>,
}

impl Simulator {
    /// Create a simulator. Without a seed the RNG is seeded from entropy.
    pub fn new(config: SessionConfig, model: HitModel, seed: Option<u64>) -> Result<Self, Error> {
        let strategy = from_model(&model)?;
        let rng = seed.map_or_else(SpinRng::from_entropy, SpinRng::new);
        let (update_tx, _) = broadcast::channel(UPDATES_CAPACITY);
        let table = Table {
            session: Session::new(config),
            rng,
            model,
            strategy,
        };
        Ok(Self {
            state: Arc::new(RwLock::new(table)),
            update_tx,
        })
    }

    /// Spin once and broadcast the report.
    pub fn spin(&self) -> Result<SpinReport, Error> {
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Failed to acquire write lock in spin: {}", e);
                return Err(Error::Poisoned);
            }
        };
        let Table {
            session,
            rng,
            strategy,
            ..
        } = &mut *state;
        let report = session.spin(rng, strategy);
        drop(state); // Release lock before broadcasting

        if self.update_tx.send(report.clone()).is_err() {
            tracing::debug!("No subscribers for spin report {}", report.index);
        }
        Ok(report)
    }

    pub fn view(&self) -> Result<SessionView, Error> {
        let state = match self.state.read() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Failed to acquire read lock in view: {}", e);
                return Err(Error::Poisoned);
            }
        };
        Ok(state.session.view())
    }

    /// Reset the session, applying any requested changes first.
    pub fn reset(&self, request: ResetRequest) -> Result<(), Error> {
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Failed to acquire write lock in reset: {}", e);
                return Err(Error::Poisoned);
            }
        };

        let current = state.session.config().clone();
        let progression = match request.progression {
            Some(stakes) => Progression::new(stakes)?,
            None => current.progression().clone(),
        };
        let config = SessionConfig::new(
            request.spin_window.unwrap_or(current.spin_window()),
            request.starting_bank.unwrap_or(current.starting_bank()),
            progression,
        )?;
        if let Some(model) = request.hit {
            state.strategy = from_model(&model)?;
            state.model = model;
        }
        tracing::info!(
            spin_window = config.spin_window(),
            starting_bank = config.starting_bank(),
            hit = ?state.model,
            "resetting session"
        );
        state.session.reset_with(config);
        Ok(())
    }

    pub fn set_spin_window(&self, spin_window: usize) -> Result<(), Error> {
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Failed to acquire write lock in set_spin_window: {}", e);
                return Err(Error::Poisoned);
            }
        };
        state.session.set_spin_window(spin_window)?;
        Ok(())
    }

    pub fn update_subscriber(&self) -> broadcast::Receiver<SpinReport> {
        self.update_tx.subscribe()
    }
}

pub struct Api {
    simulator: Arc<Simulator>,
}

impl Api {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self { simulator }
    }

    pub fn router(&self) -> Router {
        // Configure CORS
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/spin", post(spin))
            .route("/session", get(session))
            .route("/reset", post(reset))
            .route("/window/:size", put(set_window))
            .route("/kaprekar/:seed", get(kaprekar))
            .route("/classify/:outcome", get(classify_outcome))
            .route("/updates", get(updates_ws))
            .layer(cors)
            .with_state(self.simulator.clone())
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct Classification {
    pub outcome: u8,
    pub group: Group,
}

fn error_response(status: StatusCode, error: impl ToString) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn simulator_error(error: Error) -> axum::response::Response {
    match error {
        Error::Poisoned => error_response(StatusCode::INTERNAL_SERVER_ERROR, error),
        Error::Core(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

async fn spin(AxumState(simulator): AxumState<Arc<Simulator>>) -> impl IntoResponse {
    match simulator.spin() {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => simulator_error(e),
    }
}

async fn session(AxumState(simulator): AxumState<Arc<Simulator>>) -> impl IntoResponse {
    match simulator.view() {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => simulator_error(e),
    }
}

async fn reset(AxumState(simulator): AxumState<Arc<Simulator>>, body: Bytes) -> impl IntoResponse {
    let request = if body.is_empty() {
        ResetRequest::default()
    } else {
        match serde_json::from_slice::<ResetRequest>(&body) {
            Ok(request) => request,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
        }
    };
    match simulator.reset(request) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => simulator_error(e),
    }
}

async fn set_window(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Path(size): Path<usize>,
) -> impl IntoResponse {
    match simulator.set_spin_window(size) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => simulator_error(e),
    }
}

async fn kaprekar(Path(seed): Path<u32>) -> impl IntoResponse {
    match transform(seed) {
        Ok(trace) => (StatusCode::OK, Json(trace)).into_response(),
        Err(e @ kaprekar_types::Error::NonConvergence { .. }) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e)
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

async fn classify_outcome(Path(outcome): Path<u8>) -> impl IntoResponse {
    match classify(outcome) {
        Some(group) => (StatusCode::OK, Json(Classification { outcome, group })).into_response(),
        None => error_response(
            StatusCode::BAD_REQUEST,
            kaprekar_types::Error::InvalidOutcome(outcome as u32),
        ),
    }
}

async fn updates_ws(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_updates_ws(socket, simulator))
}

async fn handle_updates_ws(socket: axum::extract::ws::WebSocket, simulator: Arc<Simulator>) {
    tracing::info!("Updates WebSocket connected");
    let (mut sender, mut receiver) = socket.split();
    let mut updates = simulator.update_subscriber();

    loop {
        tokio::select! {
            // Handle incoming WebSocket messages (ping/pong/close)
            msg = receiver.next() => {
                match msg {
                    Some(Ok(axum::extract::ws::Message::Close(_))) => {
                        tracing::info!("Client closed updates WebSocket connection");
                        break;
                    }
                    Some(Ok(axum::extract::ws::Message::Ping(data))) => {
                        if sender.send(axum::extract::ws::Message::Pong(data)).await.is_err() {
                            tracing::warn!("Failed to send pong, client disconnected");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!("Updates WebSocket error: {:?}", e);
                        break;
                    }
                    None => {
                        tracing::info!("Updates WebSocket stream ended");
                        break;
                    }
                    _ => {} // Ignore other message types
                }
            }
            // Forward spin reports
            update = updates.recv() => {
                match update {
                    Ok(report) => {
                        let text = match serde_json::to_string(&report) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!("Failed to serialize spin report: {}", e);
                                continue;
                            }
                        };
                        if sender
                            .send(axum::extract::ws::Message::Text(text))
                            .await
                            .is_err()
                        {
                            tracing::warn!("Failed to send spin report, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Updates WebSocket client lagged behind, skipped {} reports",
                            skipped
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Updates broadcast channel closed");
                        break;
                    }
                }
            }
        }
    }
    tracing::info!("Updates WebSocket handler exiting");
    let _ = sender.close().await;
}
