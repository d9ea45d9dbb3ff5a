//! Script Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unknown speaker '{0}', expected 'Host' or 'Guest'")]
    UnknownSpeaker(String),

    #[error("Segment text is empty")]
    EmptyText,
}
