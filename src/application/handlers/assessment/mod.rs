//! Assessment command and query handlers.

mod confirm_profile;
mod next_question;
mod start_session;
mod submit_answer;

pub use confirm_profile::{ConfirmProfileCommand, ConfirmProfileHandler, ConfirmProfileResult};
pub use next_question::{NextQuestionHandler, NextQuestionQuery, SessionProgress};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
