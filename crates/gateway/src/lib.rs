//! HTTP interactions endpoint for Agendabot.
//!
//! Discord posts every slash command invocation to `/interactions`. The
//! request is verified, parsed, handed to the dispatcher, and the reply is
//! returned in the same HTTP response.
//!
//! Built on Axum.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};

use agendabot_channels::interaction::{
    APPLICATION_COMMAND, PING, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use agendabot_channels::{Interaction, InteractionResponse, InteractionVerifier};
use agendabot_dispatcher::{Dispatcher, replies};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub dispatcher: Arc<Dispatcher>,
    pub verifier: InteractionVerifier,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/interactions", post(interactions_handler))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Requires `discord.public_key`; without it no interaction can be verified.
pub async fn start(
    config: agendabot_config::AppConfig,
    dispatcher: Arc<Dispatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let public_key = config
        .discord
        .public_key
        .as_deref()
        .ok_or("discord.public_key is not set (AGENDABOT_PUBLIC_KEY)")?;
    let verifier = InteractionVerifier::from_hex(public_key)?;

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Interactions endpoint listening");

    let state = Arc::new(GatewayState {
        dispatcher,
        verifier,
    });
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    subjects: usize,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        subjects: state.dispatcher.subject_count().await,
    })
}

async fn interactions_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, StatusCode> {
    let (Some(signature), Some(timestamp)) = (
        header_str(&headers, SIGNATURE_HEADER),
        header_str(&headers, TIMESTAMP_HEADER),
    ) else {
        warn!("Interaction without signature headers");
        return Err(StatusCode::UNAUTHORIZED);
    };

    if let Err(e) = state.verifier.verify(signature, timestamp, &body) {
        warn!(error = %e, "Rejected interaction");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let interaction = Interaction::parse(&body).map_err(|e| {
        warn!(error = %e, "Malformed interaction");
        StatusCode::BAD_REQUEST
    })?;

    match interaction.kind {
        PING => Ok(Json(InteractionResponse::pong())),
        APPLICATION_COMMAND => {
            let data = interaction.data.as_ref().ok_or(StatusCode::BAD_REQUEST)?;
            let user = interaction.user().map(|u| u.id.as_str()).unwrap_or("unknown");
            let guild = interaction.guild_id.as_deref().unwrap_or("dm");

            let reply = match data.to_command() {
                Ok(command) => {
                    info!(command = command.name(), user, guild, "Command received");
                    state.dispatcher.handle(command).await
                }
                Err(e) => {
                    warn!(command = %data.name, user, guild, error = %e, "Invalid command");
                    replies::invalid_command(&e)
                }
            };
            Ok(Json(InteractionResponse::message(reply)))
        }
        other => {
            warn!(kind = other, "Unsupported interaction type");
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendabot_core::date::FixedClock;
    use agendabot_store::{AgendaStore, InMemoryStorage};
    use axum::body::Body;
    use axum::http::Request;
    use ed25519_dalek::{Signer, SigningKey};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[3u8; 32])
    }

    fn test_state() -> SharedState {
        let store = AgendaStore::open(Box::new(InMemoryStorage::new()));
        let today = chrono::NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
        let dispatcher = Arc::new(Dispatcher::with_clock(store, Arc::new(FixedClock(today))));
        let verifier =
            InteractionVerifier::from_hex(&hex::encode(signing_key().verifying_key().to_bytes()))
                .unwrap();
        Arc::new(GatewayState {
            dispatcher,
            verifier,
        })
    }

    fn signed_request(body: &str) -> Request<Body> {
        let timestamp = "1714300000";
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body.as_bytes());
        let signature = hex::encode(signing_key().sign(&message).to_bytes());

        Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, timestamp)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state());

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["subjects"], 0);
    }

    #[tokio::test]
    async fn ping_gets_pong() {
        let app = build_router(test_state());
        let response = app.oneshot(signed_request(r#"{"type":1}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"type": 1}));
    }

    #[tokio::test]
    async fn unsigned_request_is_rejected() {
        let app = build_router(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/interactions")
            .body(Body::from(r#"{"type":1}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected() {
        let app = build_router(test_state());
        let mut req = signed_request(r#"{"type":1}"#);
        req.headers_mut()
            .insert(TIMESTAMP_HEADER, "1714300001".parse().unwrap());
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn add_command_replies_with_confirmation() {
        let state = test_state();
        let app = build_router(state.clone());
        let body = r#"{"type":2,"member":{"user":{"id":"42"}},"data":{"name":"add","options":[
            {"name":"subject","type":3,"value":"Math"},
            {"name":"description","type":3,"value":"Essay"},
            {"name":"date","type":3,"value":"01/05/2025"}]}}"#;

        let response = app.oneshot(signed_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["type"], 4);
        assert_eq!(
            json["data"]["content"],
            "Devoir ajouté pour la matière **Math** : Essay à rendre pour le 01/05/2025"
        );
        assert_eq!(state.dispatcher.subject_count().await, 1);
    }

    #[tokio::test]
    async fn missing_option_gets_an_error_message() {
        let app = build_router(test_state());
        let body = r#"{"type":2,"data":{"name":"remove","options":[
            {"name":"subject","type":3,"value":"Math"}]}}"#;

        let response = app.oneshot(signed_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let content = json["data"]["content"].as_str().unwrap();
        assert!(content.starts_with("Commande invalide"));
        assert!(content.contains("description"));
    }

    #[tokio::test]
    async fn unsupported_interaction_type_is_bad_request() {
        let app = build_router(test_state());
        let response = app.oneshot(signed_request(r#"{"type":3}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn command_without_data_is_bad_request() {
        let app = build_router(test_state());
        let response = app.oneshot(signed_request(r#"{"type":2}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
