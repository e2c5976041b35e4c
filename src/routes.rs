use crate::{
    api::{employee, holiday, vacation},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let public_limiter = Arc::new(build_limiter(config.rate_public_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes: calendar data and pure counting need no identity.
    // calculate-days is registered before the /vacations scope so it wins.
    cfg.service(
        web::resource("/holidays")
            .wrap(public_limiter.clone())
            .route(web::get().to(holiday::get_holidays)),
    )
    .service(
        web::resource("/vacations/calculate-days")
            .wrap(public_limiter)
            .route(web::post().to(vacation::calculate_days)),
    );

    // Bearer-protected routes: each handler resolves the caller via AuthUser.
    cfg.service(
        web::scope("/employees")
            .wrap(protected_limiter.clone())
            // /employees/me
            .service(
                web::resource("/me")
                    .route(web::get().to(employee::get_my_profile))
                    .route(web::put().to(employee::update_my_profile)),
            )
            // /employees/me/balance
            .service(
                web::resource("/me/balance").route(web::get().to(employee::get_my_balance)),
            ),
    )
    .service(
        web::scope("/vacations")
            .wrap(protected_limiter)
            // /vacations
            .service(
                web::resource("")
                    .route(web::get().to(vacation::list_vacations))
                    .route(web::post().to(vacation::create_vacation)),
            )
            // /vacations/{id}
            .service(web::resource("/{id}").route(web::delete().to(vacation::delete_vacation))),
    );
}
