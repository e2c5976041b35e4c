//! MCP tool surface over the vacation engine.
//!
//! A thin adapter: each tool resolves the caller from the per-request
//! Authorization header, then delegates to `engine::service` — the same
//! operations the REST controller uses, so both surfaces give identical
//! answers.

pub mod error;

use std::sync::Arc;

use axum::http::request;
use chrono::NaiveDate;
use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, ErrorCode, Implementation, InitializeRequestParam, InitializeResult,
        ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use tracing::info;

use crate::auth::{Identity, TokenVerifier};
use crate::engine::service;

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct YearRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Year to resolve, e.g. 2025. Defaults to the current year.")]
    pub year: Option<i32>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct UpdateProfileRequest {
    #[schemars(description = "Hire date in YYYY-MM-DD format, e.g. 2024-01-15")]
    pub hire_date: String,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct CreateVacationRequest {
    #[schemars(description = "Type of request: 'vacation' or 'optional_holiday'")]
    pub vacation_type: String,
    #[schemars(description = "Start date in YYYY-MM-DD format")]
    pub start_date: String,
    #[schemars(description = "End date in YYYY-MM-DD format (inclusive)")]
    pub end_date: String,
    #[serde(default)]
    #[schemars(description = "Optional free-text notes")]
    pub notes: String,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct DeleteVacationRequest {
    #[schemars(description = "ID of the vacation entry to cancel")]
    pub vacation_id: i64,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct DateRangeRequest {
    #[schemars(description = "Start date in YYYY-MM-DD format")]
    pub start_date: String,
    #[schemars(description = "End date in YYYY-MM-DD format (inclusive)")]
    pub end_date: String,
}

#[derive(Clone)]
pub struct VacationTools {
    pool: PgPool,
    verifier: Arc<TokenVerifier>,
    tool_router: ToolRouter<Self>,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ErrorData> {
    value.parse::<NaiveDate>().map_err(|_| {
        ErrorData::new(
            ErrorCode::INVALID_PARAMS,
            format!("{field} must be a date in YYYY-MM-DD format, got '{value}'"),
            None,
        )
    })
}

fn to_structured<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_value(value)
        .map_err(|e| ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None))?;
    Ok(CallToolResult::structured(json))
}

#[tool_router]
impl VacationTools {
    pub fn new(pool: PgPool, verifier: Arc<TokenVerifier>) -> Self {
        Self {
            pool,
            verifier,
            tool_router: Self::tool_router(),
        }
    }

    /// The streamable-HTTP transport injects the request parts into the
    /// context extensions; the bearer token travels there, never in tool
    /// arguments. This is the boundary that keeps model-initiated calls
    /// safe: the model cannot name somebody else's employee id.
    fn resolve_identity(&self, context: &RequestContext<RoleServer>) -> Result<Identity, ErrorData> {
        let parts = context
            .extensions
            .get::<request::Parts>()
            .ok_or_else(|| {
                ErrorData::new(
                    ErrorCode::INVALID_REQUEST,
                    "No HTTP request context available",
                    None,
                )
            })?;

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        Ok(self.verifier.verify_header(header)?)
    }

    #[tool(
        description = "Get the list of corporate holidays for a given year (defaults to the current year). Returns holiday names and dates."
    )]
    async fn get_corporate_holidays(
        &self,
        Parameters(args): Parameters<YearRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let holidays = service::get_holidays(&self.pool, args.year).await?;

        let items: Vec<_> = holidays
            .iter()
            .map(|h| json!({ "name": h.name, "date": h.holiday_date.to_string() }))
            .collect();

        Ok(CallToolResult::structured(json!({ "holidays": items })))
    }

    #[tool(description = "Get the authenticated user's employee profile, including their hire date.")]
    async fn get_my_profile(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let identity = self.resolve_identity(&context)?;
        let employee = service::get_profile(&self.pool, &identity).await?;
        to_structured(&employee)
    }

    #[tool(description = "Update the authenticated user's hire date (YYYY-MM-DD).")]
    async fn update_my_profile(
        &self,
        Parameters(args): Parameters<UpdateProfileRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let identity = self.resolve_identity(&context)?;
        let hire_date = parse_date("hire_date", &args.hire_date)?;
        let employee = service::update_hire_date(&self.pool, &identity, hire_date).await?;
        to_structured(&employee)
    }

    #[tool(
        description = "Get the authenticated user's vacation balance: accrued, used, available, carryover and optional holidays, for a given year (defaults to the current year)."
    )]
    async fn get_my_balance(
        &self,
        Parameters(args): Parameters<YearRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let identity = self.resolve_identity(&context)?;
        let balance = service::get_balance(&self.pool, &identity, args.year).await?;
        to_structured(&balance)
    }

    #[tool(description = "List all vacation requests for the authenticated user.")]
    async fn get_my_vacations(
        &self,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let identity = self.resolve_identity(&context)?;
        let vacations = service::list_requests(&self.pool, &identity).await?;
        to_structured(&json!({ "vacations": vacations }))
    }

    #[tool(
        description = "Create a new vacation entry for the authenticated user. vacation_type is 'vacation' or 'optional_holiday'; dates are YYYY-MM-DD. Returns the created entry plus the resulting balance (a negative available count means over budget)."
    )]
    async fn create_vacation_entry(
        &self,
        Parameters(args): Parameters<CreateVacationRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let identity = self.resolve_identity(&context)?;
        let start = parse_date("start_date", &args.start_date)?;
        let end = parse_date("end_date", &args.end_date)?;

        let created = service::create_request(
            &self.pool,
            &identity,
            &args.vacation_type,
            start,
            end,
            &args.notes,
        )
        .await?;

        to_structured(&created)
    }

    #[tool(description = "Cancel a vacation entry for the authenticated user by its ID.")]
    async fn delete_vacation_entry(
        &self,
        Parameters(args): Parameters<DeleteVacationRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let identity = self.resolve_identity(&context)?;
        service::cancel_request(&self.pool, &identity, args.vacation_id).await?;

        Ok(CallToolResult::structured(json!({
            "message": "Vacation request cancelled"
        })))
    }

    #[tool(
        description = "Calculate the number of business days between two dates (YYYY-MM-DD, inclusive), excluding weekends and corporate holidays."
    )]
    async fn calc_business_days(
        &self,
        Parameters(args): Parameters<DateRangeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let start = parse_date("start_date", &args.start_date)?;
        let end = parse_date("end_date", &args.end_date)?;

        let report = service::calculate_business_days(&self.pool, start, end).await?;
        to_structured(&report)
    }
}

#[tool_handler]
impl ServerHandler for VacationTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Vacation management MCP server: balances, corporate holidays, business-day \
                 calculations and vacation requests for the authenticated employee."
                    .to_string(),
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, ErrorData> {
        if let Some(http_request_part) = context.extensions.get::<request::Parts>() {
            let initialize_headers = &http_request_part.headers;
            let initialize_uri = &http_request_part.uri;
            info!(?initialize_headers, %initialize_uri, "initialize from http server");
        }
        Ok(self.get_info())
    }
}
