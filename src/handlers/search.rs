use crate::{error::ApiError, models::AnalyzeRequest, services::QueryAnalyzerService};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use log::debug;

pub fn search_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/search/analyze").route(web::post().to(analyze_query)));
}

/// Analyze a search query: spelling correction, entity extraction, intent
/// classification, filter suggestion and query expansion.
pub async fn analyze_query(
    request: Json<AnalyzeRequest>,
    analyzer_service: web::Data<QueryAnalyzerService>,
) -> Result<HttpResponse, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    debug!("Analyzing search query: '{}'", request.query);
    let analysis = analyzer_service.analyze(&request.query);

    Ok(HttpResponse::Ok().json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn analyze_endpoint_returns_full_analysis() {
        let service = web::Data::new(QueryAnalyzerService::new());
        let app = test::init_service(
            App::new()
                .app_data(service)
                .service(web::scope("/api").configure(search_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/search/analyze")
            .set_json(serde_json::json!({ "query": "iphne ไม่เกิน 15000" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["corrected_query"], "iphone ไม่เกิน 15000");
        assert_eq!(body["did_correct"], true);
        assert_eq!(body["intent"]["type"], "price_check");
        assert_eq!(body["entities"]["brand"], "apple");
        assert_eq!(body["suggested_filters"]["max_price"], 15000);
    }

    #[actix_web::test]
    async fn analyze_endpoint_rejects_empty_query() {
        let service = web::Data::new(QueryAnalyzerService::new());
        let app = test::init_service(
            App::new()
                .app_data(service)
                .service(web::scope("/api").configure(search_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/search/analyze")
            .set_json(serde_json::json!({ "query": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
