use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub mcp_addr: String,
    pub chat_addr: String,

    // Token verification: either a JWKS endpoint (RS256, enterprise IdP)
    // or a shared secret (HS256, development).
    pub jwks_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub oauth_issuer: Option<String>,
    pub oauth_audience: Option<String>,

    // Rate limiting
    pub rate_public_per_min: u32,
    pub rate_protected_per_min: u32,

    // Chat orchestrator
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub mcp_server_url: String,
    pub max_conversation_messages: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            mcp_addr: env::var("MCP_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string()),
            chat_addr: env::var("CHAT_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            jwks_url: env::var("JWKS_URL").ok(),
            jwt_secret: env::var("JWT_SECRET").ok(),
            oauth_issuer: env::var("OAUTH_ISSUER").ok(),
            oauth_audience: env::var("OAUTH_AUDIENCE").ok(),

            rate_public_per_min: env::var("RATE_PUBLIC_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            mcp_server_url: env::var("MCP_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8081/mcp".to_string()),
            max_conversation_messages: env::var("MAX_CONVERSATION_MESSAGES")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap(),
        }
    }
}
