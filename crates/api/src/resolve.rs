//! Translate human-readable state and member names into the IDs the API expects.
//!
//! Every resolution lists the collection fresh; nothing is cached between calls.

use tracing::debug;

use crate::error::{ApiError, OperationContext, Result};
use crate::models::{Member, State};
use crate::ApiClient;

/// A record that can be looked up by an exact, case-sensitive name.
pub trait Named {
    const KIND: &'static str;

    fn name(&self) -> &str;
    fn id(&self) -> &str;
}

impl Named for State {
    const KIND: &'static str = "state";

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Member {
    const KIND: &'static str = "member";

    fn name(&self) -> &str {
        &self.display_name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Find the single record called `name`.
///
/// No match is a [`ApiError::NotFound`] carrying the name; more than one is
/// [`ApiError::AmbiguousName`] rather than an arbitrary pick.
pub fn find_by_name<'a, T: Named>(records: &'a [T], name: &str) -> Result<&'a T> {
    let mut matches = records.iter().filter(|record| record.name() == name);

    let first = matches.next().ok_or_else(|| ApiError::NotFound {
        kind: T::KIND,
        key: name.to_string(),
    })?;

    let others = matches.count();
    if others > 0 {
        return Err(ApiError::AmbiguousName {
            kind: T::KIND,
            name: name.to_string(),
            count: others + 1,
        });
    }

    Ok(first)
}

/// Name lookups scoped to one project.
pub struct NameResolver<'a> {
    client: &'a ApiClient,
    workspace: &'a str,
    project_id: &'a str,
}

impl<'a> NameResolver<'a> {
    pub fn new(client: &'a ApiClient, workspace: &'a str, project_id: &'a str) -> Self {
        Self {
            client,
            workspace,
            project_id,
        }
    }

    pub async fn state_id(&self, name: &str) -> Result<String> {
        let states = self
            .client
            .states()
            .list(self.workspace, self.project_id)
            .await
            .during(|| format!("listing states of project {}", self.project_id))?;

        let state = find_by_name(&states, name)?;
        debug!(state = %name, id = %state.id, "Resolved state name");
        Ok(state.id.clone())
    }

    pub async fn member_id(&self, display_name: &str) -> Result<String> {
        self.member_ids(&[display_name])
            .await?
            .pop()
            .ok_or_else(|| ApiError::NotFound {
                kind: Member::KIND,
                key: display_name.to_string(),
            })
    }

    /// Resolve several display names against one member listing, preserving order.
    pub async fn member_ids<S: AsRef<str>>(&self, display_names: &[S]) -> Result<Vec<String>> {
        if display_names.is_empty() {
            return Ok(Vec::new());
        }

        let members = self
            .client
            .members()
            .list(self.workspace, self.project_id)
            .await
            .during(|| format!("listing members of project {}", self.project_id))?;

        display_names
            .iter()
            .map(|name| {
                let member = find_by_name(&members, name.as_ref())?;
                debug!(member = %name.as_ref(), id = %member.id, "Resolved member name");
                Ok(member.id.clone())
            })
            .collect()
    }
}
