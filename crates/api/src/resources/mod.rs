//! One view per resource kind, each borrowing the shared [`ApiClient`].

pub mod attachments;
pub mod comments;
pub mod cycles;
pub mod issues;
pub mod labels;
pub mod links;
pub mod members;
pub mod modules;
pub mod projects;
pub mod states;
pub mod worklogs;

pub use attachments::{AttachmentFile, Attachments, UploadRequest};
pub use comments::{CommentRequest, Comments};
pub use cycles::{CycleRequest, Cycles};
pub use issues::{IssueRequest, Issues};
pub use labels::{LabelRequest, Labels};
pub use links::{LinkRequest, Links};
pub use members::Members;
pub use modules::{ModuleRequest, Modules};
pub use projects::{CreateProject, Projects, UpdateProject};
pub use states::{StateRequest, States};
pub use worklogs::{WorklogRequest, Worklogs};

use serde::Serialize;

use crate::ApiClient;

impl ApiClient {
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn issues(&self) -> Issues<'_> {
        Issues::new(self)
    }

    pub fn cycles(&self) -> Cycles<'_> {
        Cycles::new(self)
    }

    pub fn modules(&self) -> Modules<'_> {
        Modules::new(self)
    }

    pub fn labels(&self) -> Labels<'_> {
        Labels::new(self)
    }

    pub fn states(&self) -> States<'_> {
        States::new(self)
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(self)
    }

    pub fn links(&self) -> Links<'_> {
        Links::new(self)
    }

    pub fn attachments(&self) -> Attachments<'_> {
        Attachments::new(self)
    }

    pub fn worklogs(&self) -> Worklogs<'_> {
        Worklogs::new(self)
    }

    pub fn members(&self) -> Members<'_> {
        Members::new(self)
    }
}

pub(crate) fn project_path(workspace: &str, project_id: &str) -> String {
    format!("/workspaces/{workspace}/projects/{project_id}")
}

pub(crate) fn issue_path(workspace: &str, project_id: &str, issue_id: &str) -> String {
    format!("{}/issues/{issue_id}", project_path(workspace, project_id))
}

/// Request body for bulk-attaching issues to a cycle or module.
#[derive(Serialize)]
pub(crate) struct IssueIds<'a> {
    pub issues: &'a [String],
}
