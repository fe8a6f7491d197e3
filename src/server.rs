use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tracing::info;

use crate::api::{ApiAnalyzeRequest, ApiAnalyzeResponse, ApiContextRequest, ApiContextResponse};
use content_insight::config::InsightConfig;
use content_insight::context::ContextAssembler;
use content_insight::memory_client::MemoryClient;
use content_insight::patterns::PatternAnalyzer;
use content_insight::recommend::build_recommendations;
use content_insight::scoring::ScoreCalculator;

#[derive(Clone)]
struct AppState {
    config: InsightConfig,
    memory: Option<MemoryClient>,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, _) = InsightConfig::load(None)?;

    let memory = if args.memory {
        Some(MemoryClient::from_config(&config.memory)?)
    } else {
        None
    };

    let state = AppState { config, memory };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/context", post(context_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "content-insight API listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, String)> {
    let platform = request
        .platform()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let calculator = ScoreCalculator::new(
        state.config.weights.simple.clone(),
        state.config.weights.normalized.clone(),
    );
    let analyzer = PatternAnalyzer::new(calculator, state.config.patterns.clone());
    let analysis = analyzer.analyze(&request.items, platform);
    let recommendations = build_recommendations(&analysis, &state.config.patterns);

    Ok(Json(ApiAnalyzeResponse {
        analysis,
        recommendations,
    }))
}

async fn context_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiContextRequest>,
) -> Result<Json<ApiContextResponse>, (StatusCode, String)> {
    let platform = request
        .platform()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let assembler = ContextAssembler::from_config(&state.config);

    let bundle = match (&state.memory, request.semantic, request.query.as_deref()) {
        (Some(client), true, Some(query)) if !query.trim().is_empty() => {
            assembler
                .assemble_semantic(&request.items, platform, query, client)
                .await
        }
        _ => assembler.assemble(&request.items, platform),
    };

    Ok(Json(ApiContextResponse {
        context: bundle.text,
        ranking: bundle.ranking,
        degraded: bundle.degraded,
        item_count: bundle.item_count,
    }))
}
