use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::AskRequest};

#[get("/api/qa")]
pub async fn get_conversation(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.qa_service.snapshot().await)
}

#[post("/api/qa/ask")]
pub async fn ask_question(
    state: web::Data<Arc<AppState>>,
    request: web::Json<AskRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let snapshot = state.qa_service.ask(&request.prompt).await;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[post("/api/qa/clear")]
pub async fn clear_conversation(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.qa_service.clear().await)
}
