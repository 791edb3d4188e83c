use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_BANNER: &str = "ARETION Informatics Solutions API";

#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

/// Service banner, reachable as both `/api` and `/api/`.
#[utoipa::path(
    get,
    path = "/api/",
    responses(
        (status = 200, description = "Service banner", body = RootResponse)
    ),
    tag = "Root"
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        message: SERVICE_BANNER.to_string(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["", "/"]).route(web::get().to(root)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_root_endpoint() {
        let app = test::init_service(
            App::new().service(web::scope("/api").configure(configure_routes)),
        )
        .await;

        for uri in ["/api", "/api/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let body: RootResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body.message, SERVICE_BANNER, "unexpected banner at {}", uri);
        }
    }
}
