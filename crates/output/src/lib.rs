use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use plane_api::models::{
    Attachment, Comment, Cycle, Issue, Label, Link, Member, Module, Project, State, Worklog,
    WorklogTotal,
};

const MAX_CELL_WIDTH: usize = 60;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    /// One id per line, for piping into other commands.
    Quiet,
}

/// A resource that knows how to lay itself out as a table row.
pub trait Record: Serialize {
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &str;

    /// One cell per entry in [`Record::COLUMNS`].
    fn cells(&self) -> Vec<String>;
}

pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render_list<T: Record>(&self, items: &[T]) -> Result<()> {
        println!("{}", self.format_list(items)?);
        Ok(())
    }

    pub fn render_one<T: Record>(&self, item: &T) -> Result<()> {
        println!("{}", self.format_one(item)?);
        Ok(())
    }

    pub fn format_list<T: Record>(&self, items: &[T]) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table if items.is_empty() => "No results".to_string(),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(T::COLUMNS.iter().copied());
                for item in items {
                    builder.push_record(item.cells());
                }
                builder.build().with(Style::rounded()).to_string()
            }
            OutputFormat::Json => serde_json::to_string_pretty(items)?,
            OutputFormat::Yaml => serde_yaml::to_string(items)?,
            OutputFormat::Quiet => items
                .iter()
                .map(Record::id)
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }

    /// A single record; tables are rendered as field/value pairs.
    pub fn format_one<T: Record>(&self, item: &T) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (column, cell) in T::COLUMNS.iter().zip(item.cells()) {
                    builder.push_record([column.to_string(), cell]);
                }
                builder.build().with(Style::rounded()).to_string()
            }
            OutputFormat::Json => serde_json::to_string_pretty(item)?,
            OutputFormat::Yaml => serde_yaml::to_string(item)?,
            OutputFormat::Quiet => item.id().to_string(),
        })
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn truncate(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn date(value: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .as_ref()
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

impl Record for Project {
    const COLUMNS: &'static [&'static str] = &["ID", "Identifier", "Name", "Created"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.identifier.clone(),
            self.name.clone(),
            date(&self.created_at),
        ]
    }
}

impl Record for Issue {
    const COLUMNS: &'static [&'static str] =
        &["ID", "Seq", "Name", "State", "Priority", "Assignees"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.sequence_id.map(|n| n.to_string()).unwrap_or_default(),
            truncate(&self.name),
            opt(&self.state),
            opt(&self.priority),
            self.assignees.join(", "),
        ]
    }
}

impl Record for Cycle {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Start", "End"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&self.name),
            opt(&self.start_date),
            opt(&self.end_date),
        ]
    }
}

impl Record for Module {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Status", "Start", "Target"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&self.name),
            opt(&self.status),
            opt(&self.start_date),
            opt(&self.target_date),
        ]
    }
}

impl Record for Label {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Color", "Parent"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.color),
            opt(&self.parent),
        ]
    }
}

impl Record for State {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Group", "Color"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.group),
            opt(&self.color),
        ]
    }
}

impl Record for Comment {
    const COLUMNS: &'static [&'static str] = &["ID", "Author", "Comment", "Created"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.actor.clone().or_else(|| self.created_by.clone()).unwrap_or_default(),
            truncate(&self.comment_html),
            date(&self.created_at),
        ]
    }
}

impl Record for Link {
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "URL"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), opt(&self.title), self.url.clone()]
    }
}

impl Record for Worklog {
    const COLUMNS: &'static [&'static str] = &["ID", "Minutes", "Description", "Logged by"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.duration.to_string(),
            truncate(&self.description),
            opt(&self.logged_by),
        ]
    }
}

impl Record for WorklogTotal {
    const COLUMNS: &'static [&'static str] = &["Issue", "Minutes"];

    fn id(&self) -> &str {
        &self.issue_id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.issue_id.clone(), self.duration.to_string()]
    }
}

impl Record for Member {
    const COLUMNS: &'static [&'static str] = &["ID", "Display name", "Name", "Email"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        let full_name = [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        vec![
            self.id.clone(),
            self.display_name.clone(),
            full_name,
            opt(&self.email),
        ]
    }
}

impl Record for Attachment {
    const COLUMNS: &'static [&'static str] = &["ID", "File", "Bytes", "Uploaded"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.file_name().unwrap_or_default().to_string(),
            self.size.to_string(),
            self.is_uploaded.to_string(),
        ]
    }
}
