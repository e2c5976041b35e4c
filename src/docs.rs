use crate::api::employee::UpdateProfile;
use crate::api::vacation::{CreateVacation, DateRange};
use crate::engine::service::{BusinessDayReport, CreatedRequest};
use crate::model::{BalanceSnapshot, CorporateHoliday, Employee, VacationRequest};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vacay API",
        version = "1.0.0",
        description = r#"
## Vacay — vacation tracking

REST surface of the vacation-accounting engine. The same engine operations
are exposed in parallel as MCP tools, so balances and validations are
identical no matter which interface asks.

### Key features
- **Profile**: view and correct your hire date
- **Balance**: derived accrual / carryover / optional-holiday snapshot
- **Vacations**: create, list and cancel vacation requests
- **Holidays**: lazily-synced corporate holiday calendar, business-day math

### Security
Protected endpoints use **JWT Bearer authentication**; identity comes from
the verified token, never from request parameters.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::get_my_profile,
        crate::api::employee::update_my_profile,
        crate::api::employee::get_my_balance,

        crate::api::vacation::list_vacations,
        crate::api::vacation::create_vacation,
        crate::api::vacation::delete_vacation,
        crate::api::vacation::calculate_days,

        crate::api::holiday::get_holidays,
    ),
    components(schemas(
        Employee,
        VacationRequest,
        CorporateHoliday,
        BalanceSnapshot,
        BusinessDayReport,
        CreatedRequest,
        UpdateProfile,
        CreateVacation,
        DateRange,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employee", description = "Profile and balance"),
        (name = "Vacation", description = "Vacation requests and business-day math"),
        (name = "Holiday", description = "Corporate holiday calendar"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
