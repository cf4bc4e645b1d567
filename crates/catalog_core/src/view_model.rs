use crate::{Character, Status};

/// Immutable snapshot of a list session handed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub status: Status,
    pub query: String,
    pub page: u32,
    pub results: Vec<Character>,
    pub error_message: Option<String>,
    pub has_more: bool,
    pub loading_more: bool,
}
