use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header::AUTHORIZATION, HeaderMap},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::auth::{bearer_token, RequestContext};
use crate::config::AppConfig;
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema};
use crate::images::{ImageStore, LocalImageStore, RECIPE_IMAGE_PUBLIC_PREFIX};
use crate::services::AuthService;

use super::handlers::health;

/// Headroom for the non-file parts of a multipart request
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub graphql_schema: GraphQLSchema,
    pub auth_service: Arc<AuthService>,
}

pub async fn create_app(db: DatabaseConnection, config: &AppConfig) -> Result<Router> {
    let images: Arc<dyn ImageStore> = Arc::new(
        LocalImageStore::new(config.upload_dir.clone()).with_max_bytes(config.max_upload_bytes),
    );

    let graphql_context = GraphQLContext::new(db, images, config.api_url.clone())
        .with_max_upload_bytes(config.max_upload_bytes);
    let state = AppState {
        auth_service: graphql_context.auth_service.clone(),
        graphql_schema: build_schema(graphql_context),
    };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any)
            .allow_credentials(false),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any)
            .allow_credentials(false),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        .route(
            "/graphql",
            get(graphql_playground)
                .post(graphql_handler)
                .options(|| async { axum::http::StatusCode::OK }),
        )
        .nest_service(
            &format!("/{}", RECIPE_IMAGE_PUBLIC_PREFIX),
            ServeDir::new(config.recipe_image_dir()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(
                    config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
                ))
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    let request_ctx = match state.auth_service.request_context(token).await {
        Ok(request_ctx) => request_ctx,
        Err(e) => {
            warn!("Failed to resolve session, continuing anonymously: {}", e);
            RequestContext::anonymous()
        }
    };

    debug!(
        "GraphQL request received (authenticated: {})",
        request_ctx.is_authenticated()
    );
    let response = state
        .graphql_schema
        .execute(req.into_inner().data(request_ctx))
        .await;
    debug!("GraphQL request completed");

    response.into()
}

async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
