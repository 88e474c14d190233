use crate::api::FixtureSource;
use crate::models::{Goals, Match};
use crate::service::MatchService;
use crate::utils::grouping::{group_matches, DayGroup};
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

// Custom filters for formatting
mod filters {
    use crate::models::Match;

    pub fn score(m: &Match) -> ::askama::Result<String> {
        Ok(m.score().unwrap_or_else(|| "vs".to_string()))
    }

    pub fn or_empty(value: &Option<String>) -> ::askama::Result<String> {
        Ok(value.clone().unwrap_or_default())
    }

    /// Lowercased text the search box matches against
    pub fn search_text(m: &Match) -> ::askama::Result<String> {
        Ok(format!("{} {} {}", m.home_team, m.away_team, m.league).to_lowercase())
    }
}

#[derive(Template)]
#[template(path = "matches.html")]
struct MatchesTemplate {
    days: Vec<DayGroup>,
    total: usize,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

/// Swagger UI page reading the document from `/api/openapi.json`
#[derive(Template)]
#[template(path = "swagger.html")]
struct SwaggerTemplate {
    title: &'static str,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "futbol_hoy",
        description = "Today's and tomorrow's matches for the followed leagues",
        version = "1.0"
    ),
    paths(today_matches),
    components(schemas(Match, Goals))
)]
struct ApiDoc;

type SharedService<S> = Arc<MatchService<S>>;

async fn home<S>(State(service): State<SharedService<S>>) -> impl IntoResponse
where
    S: FixtureSource + 'static,
{
    let matches = service.get_today_matches().await;

    let template = MatchesTemplate {
        total: matches.len(),
        days: group_matches(&matches),
    };

    HtmlTemplate(template)
}

#[utoipa::path(
    get,
    path = "/matches/today",
    responses(
        (
            status = 200,
            description = "Followed-league matches for today and tomorrow",
            body = [Match]
        )
    )
)]
async fn today_matches<S>(State(service): State<SharedService<S>>) -> Json<Vec<Match>>
where
    S: FixtureSource + 'static,
{
    Json(service.get_today_matches().await)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    HtmlTemplate(SwaggerTemplate {
        title: "futbol_hoy API",
    })
}

/// Dashboard page, JSON listing, API docs and static assets
pub fn router<S>(service: SharedService<S>) -> Router
where
    S: FixtureSource + 'static,
{
    Router::new()
        // Stylesheet and search/tab script
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(home::<S>))
        .route("/matches/today", get(today_matches::<S>))
        .route("/api", get(swagger_ui))
        .route("/api/openapi.json", get(openapi_json))
        .with_state(service)
}
