use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{CandidatePool, FormationConfig, FormationError, MatchFormer};
use crate::models::{
    Candidate, ErrorResponse, FormMatchesRequest, FormMatchesResponse, HealthResponse,
    MatchRecord, PriorityWeights,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub former: MatchFormer,
    pub weights: PriorityWeights,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/form", web::post().to(form_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Form matches endpoint
///
/// POST /api/v1/matches/form
///
/// Request body:
/// ```json
/// {
///   "players": [
///     { "id": "string", "mmr": 2000, "roles": ["top", "jungle", "mid", "bot", "sup"], "waitingTime": 120 }
///   ],
///   "teamSize": 5
/// }
/// ```
///
/// Every request gets its own pool; players left over are listed in
/// `unmatched` for the caller to queue again.
async fn form_matches(
    state: web::Data<AppState>,
    req: web::Json<FormMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for form_matches request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let FormMatchesRequest { players, team_size } = req.into_inner();
    let total_players = players.len();

    let former = match team_size {
        Some(size) if size != state.former.config().team_size() => {
            let base = state.former.config();
            match FormationConfig::new(size, base.balance_iterations(), base.role_selection()) {
                Ok(config) => MatchFormer::new(config),
                Err(e) => return bad_request("Invalid team size", e.to_string()),
            }
        }
        _ => state.former.clone(),
    };

    // Ingestion: every record must be valid before anything enters the pool
    let candidates = match players
        .into_iter()
        .map(|record| record.into_candidate(&state.weights))
        .collect::<Result<Vec<Candidate>, FormationError>>()
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::info!("Rejected malformed player record: {}", e);
            return bad_request("Malformed candidate", e.to_string());
        }
    };

    let mut pool: CandidatePool = candidates.into_iter().collect();

    tracing::info!(
        "Forming matches for {} players (team size {})",
        total_players,
        former.config().team_size()
    );

    let matches = match former.form_matches(&mut pool) {
        Ok(matches) => matches,
        Err(partial) => {
            tracing::error!("Match formation failed: {}", partial);
            return HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Match formation failed".to_string(),
                message: partial.error.to_string(),
                status_code: 422,
            });
        }
    };

    let response = FormMatchesResponse {
        matches: matches.iter().map(MatchRecord::from).collect(),
        unmatched: pool
            .into_remaining()
            .into_iter()
            .map(|candidate| candidate.id().to_string())
            .collect(),
        total_players,
    };

    tracing::info!(
        "Returning {} matches ({} players unmatched)",
        response.matches.len(),
        response.unmatched.len()
    );

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    fn app_state() -> AppState {
        AppState {
            former: MatchFormer::with_default_config(),
            weights: PriorityWeights::default(),
        }
    }

    fn players(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| {
                json!({
                    "id": format!("player-{}", i),
                    "mmr": 1500 + i * 50,
                    "roles": ["top", "jungle", "mid", "bot", "sup"],
                    "waitingTime": 100 + i,
                })
            })
            .collect()
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_form_matches_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/form")
            .set_json(json!({ "players": players(23) }))
            .to_request();
        let body: FormMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.matches.len(), 2);
        assert_eq!(body.unmatched.len(), 3);
        assert_eq!(body.total_players, 23);
        for m in &body.matches {
            assert_eq!(m.teams.len(), 2);
            for team in &m.teams {
                assert_eq!(team.users.len(), 5);
            }
        }
    }

    #[actix_web::test]
    async fn test_custom_team_size() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/form")
            .set_json(json!({ "players": players(12), "teamSize": 3 }))
            .to_request();
        let body: FormMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.matches.len(), 2);
        assert!(body.unmatched.is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_player_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let mut roster = players(10);
        roster[4]["roles"] = json!(["top", "jungle", "mid", "bot", "carry"]);

        let req = test::TestRequest::post()
            .uri("/matches/form")
            .set_json(json!({ "players": roster }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Malformed candidate");
        assert!(body.message.contains("player-4"));
    }

    #[actix_web::test]
    async fn test_wrong_role_count_fails_validation() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let mut roster = players(10);
        roster[0]["roles"] = json!(["top", "jungle"]);

        let req = test::TestRequest::post()
            .uri("/matches/form")
            .set_json(json!({ "players": roster }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
