pub mod assistant;
pub mod message;
pub mod quiz_question;
pub mod quiz_session;
pub use assistant::{Effect, MathAssistant, Phase, ScoreTier};
pub use message::{Message, MessageAuthor, MessageKind, MessageLog};
pub use quiz_question::QuizQuestion;
pub use quiz_session::{QuizSession, Selection};
