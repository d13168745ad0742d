use std::sync::Arc;

use actix_web::{web, HttpResponse};
use log::{debug, error};
use serde::Deserialize;

use crate::generator::{ClashBuilders, GenerateError};
use crate::interfaces::{get_cl_normal_config, get_cl_warp_config, ClashDocument};
use crate::models::AppState;

/// Query parameters of the WARP endpoint
#[derive(Deserialize, Debug, Default, Clone)]
pub struct WarpQuery {
    /// Whether to emit the enhanced (Amnezia) variant
    #[serde(default)]
    pub pro: bool,
}

fn into_response(result: Result<ClashDocument, GenerateError>) -> HttpResponse {
    match result {
        Ok(document) => {
            let mut resp = HttpResponse::Ok();
            for (name, value) in document.headers {
                resp.insert_header((name, value));
            }
            resp.body(document.content)
        }
        Err(e) => {
            error!("Failed to generate Clash config: {}", e);
            HttpResponse::InternalServerError().body(format!("Generation error: {}", e))
        }
    }
}

/// Handler for the VLESS/Trojan document
pub async fn clash_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    debug!("Generating normal Clash config");
    let settings = app_state.settings.as_ref();
    let builders = ClashBuilders::new(settings);
    into_response(get_cl_normal_config(settings, &builders))
}

/// Handler for the WARP document
pub async fn warp_handler(
    query: web::Query<WarpQuery>,
    app_state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    debug!("Generating warp Clash config, pro: {}", query.pro);
    let settings = app_state.settings.as_ref();
    let builders = ClashBuilders::new(settings);
    into_response(get_cl_warp_config(settings, &builders, &app_state.dataset_store, query.pro).await)
}

/// Register the API endpoints with Actix Web
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/clash", web::get().to(clash_handler))
        .route("/clash/warp", web::get().to(warp_handler));
}
