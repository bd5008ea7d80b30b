pub mod math_handler;
pub mod qa_handler;

use actix_web::{get, web, HttpResponse};

pub use math_handler::{get_math_assistant, restart_quiz, start_chat, submit_answer, submit_name};
pub use qa_handler::{ask_question, clear_conversation, get_conversation};

#[get("/api/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Registers every route of the server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(get_math_assistant)
        .service(start_chat)
        .service(submit_name)
        .service(submit_answer)
        .service(restart_quiz)
        .service(get_conversation)
        .service(ask_question)
        .service(clear_conversation);
}
