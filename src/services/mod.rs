pub mod gemini_client;
pub mod math_assistant_service;
pub mod qa_service;
pub mod question_provider;
pub mod shuffle;
