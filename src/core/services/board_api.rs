use crate::core::error::BoardError;
use crate::core::models::{BoardPriority, BoardTitle, BoardsPriorities, IssuePriority, IssuesPriorities};
use super::http::{BoardRequest, Method};

pub const UPDATE_ISSUES_PRIORITIES: &str = "updateIssuesPriorities";
pub const UPDATE_PRIORITIES: &str = "updatePriorities";

/// Builds the requests for one project's board endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardApi {
    base_url: String,
    csrf: String,
}

impl BoardApi {
    pub fn new(base_url: impl Into<String>, csrf: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf: csrf.into(),
        }
    }

    fn project_path(&self, suffix: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), suffix)
    }

    pub fn update_issues_priorities(&self, issues: Vec<IssuePriority>) -> Result<BoardRequest, BoardError> {
        BoardRequest::new(Method::Put, self.project_path(UPDATE_ISSUES_PRIORITIES), &self.csrf)
            .json(&IssuesPriorities { issues })
    }

    pub fn update_board_priorities(&self, boards: Vec<BoardPriority>) -> Result<BoardRequest, BoardError> {
        BoardRequest::new(Method::Put, self.project_path(UPDATE_PRIORITIES), &self.csrf)
            .json(&BoardsPriorities { boards })
    }

    pub fn rename_board(&self, url: &str, title: &str) -> Result<BoardRequest, BoardError> {
        BoardRequest::new(Method::Put, url, &self.csrf)
            .remote()
            .json(&BoardTitle { title: title.to_string() })
    }

    pub fn set_default_board(&self, url: &str) -> BoardRequest {
        BoardRequest::new(Method::Post, url, &self.csrf).remote()
    }

    pub fn delete_board(&self, url: &str) -> BoardRequest {
        BoardRequest::new(Method::Delete, url, &self.csrf).remote()
    }

    pub fn create_board(&self, url: &str, title: &str) -> Result<BoardRequest, BoardError> {
        BoardRequest::new(Method::Post, url, &self.csrf)
            .remote()
            .json(&BoardTitle { title: title.to_string() })
    }
}
