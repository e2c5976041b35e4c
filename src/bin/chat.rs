use actix_web::error::ErrorInternalServerError;
use actix_web::middleware::NormalizePath;
use actix_web::web::{Data, Json};
use actix_web::{App, HttpServer, Responder, get, post};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};
use tracing_appender::rolling;

use vacay::auth::{AuthUser, TokenVerifier};
use vacay::chat::ChatService;
use vacay::config::Config;

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    history: Vec<Value>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    history: Vec<Value>,
}

#[post("/api/chat")]
async fn chat(
    user: AuthUser,
    service: Data<ChatService>,
    payload: Json<ChatRequest>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let mut messages = payload.history;
    if messages.is_empty() {
        messages.push(json!({ "role": "system", "content": ChatService::initial_prompt() }));
    }
    messages.push(json!({ "role": "user", "content": payload.message }));

    let history = service
        .chat(&user.token, messages)
        .await
        .map_err(|e| {
            error!(error = %e, "Chat turn failed");
            ErrorInternalServerError(json!({ "error": e.to_string() }))
        })?;

    let response = history
        .last()
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default()
        .to_string();

    Ok(Json(ChatResponse { response, history }))
}

#[get("/api/tools")]
async fn tools(user: AuthUser, service: Data<ChatService>) -> actix_web::Result<impl Responder> {
    let tools = service.list_tools(&user.token).await.map_err(|e| {
        error!(error = %e, "Tool discovery failed");
        ErrorInternalServerError(json!({ "error": e.to_string() }))
    })?;

    Ok(Json(json!({ "tools": tools })))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "chat.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .pretty()
        .init();

    info!("Chat server starting...");

    let verifier = TokenVerifier::from_config(&config)
        .await
        .expect("Failed to initialize token verification");
    let verifier = Data::new(verifier);

    let service =
        Data::new(ChatService::new(&config).expect("Failed to initialize the chat service"));

    let chat_addr = config.chat_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(verifier.clone())
            .app_data(service.clone())
            .service(chat)
            .service(tools)
    })
    .bind(chat_addr)?
    .run()
    .await
}
