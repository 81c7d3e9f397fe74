use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScopeError {
    #[error("Cannot pop the root scope")]
    ScopeUnderflow,
}
