//! Server construction and route wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{hotels, reservations, rooms, users};
use crate::middleware::Trace;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(reservations::list_reservations)
        .service(reservations::get_reservation)
        .service(reservations::create_reservation)
        .service(reservations::update_reservation)
        .service(reservations::delete_reservation)
        .service(reservations::list_hotel_reservations)
        .service(reservations::list_user_reservations)
        .service(hotels::list_hotels)
        .service(hotels::list_hotels_by_owner)
        .service(hotels::list_hotels_by_location)
        .service(hotels::get_hotel)
        .service(hotels::create_hotel)
        .service(hotels::update_hotel)
        .service(hotels::delete_hotel)
        .service(rooms::list_hotel_rooms)
        .service(rooms::get_room)
        .service(rooms::create_room)
        .service(rooms::update_room)
        .service(rooms::delete_room)
        .service(users::list_users)
        .service(users::get_user_by_email)
        .service(users::get_user)
        .service(users::register_user)
        .service(users::update_user)
        .service(users::delete_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the adapters cannot be assembled or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    #[actix_web::test]
    async fn wired_app_serves_reservation_listing() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        let http_state = build_http_state(&config).expect("state builds");
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();

        let app = actix_test::init_service(build_app(health_state, http_state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/reservations")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
