use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("parse error: {0}")]
    NomError(String),
    #[error("unexpected trailing input: {0}")]
    UnconsumedInput(String),
    #[error("input too long: {0} bytes")]
    InputTooLong(usize),
}
