//! Upload form workflow
//!
//! Drives an [`UploadSession`] from the terminal: column discovery, column
//! assignment (flags, auto-selection or interactive), prompt editing and the
//! analysis call. Every remote outcome goes back through the session so the
//! CLI reports exactly the messages the web form shows.

use crate::client::{ApiClient, UploadFile};
use crate::error::{PatentError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Editor, Select};
use indicatif::{ProgressBar, ProgressStyle};
use patent_analysis_common::prompts::missing_summary_fields;
use patent_analysis_common::{AnalyzeOptions, ColumnField, Completion, UploadSession};
use std::path::Path;
use std::time::Duration;

pub type Session = UploadSession<UploadFile>;

/// Column names given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub title: Option<String>,
    pub abstract_col: Option<String>,
    pub claims: Option<String>,
}

impl ColumnOverrides {
    pub fn get(&self, field: ColumnField) -> Option<&str> {
        let value = match field {
            ColumnField::Title => self.title.as_deref(),
            ColumnField::Abstract => self.abstract_col.as_deref(),
            ColumnField::Claims => self.claims.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        ColumnField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Error text the session settled in, if any
fn session_failure(session: &Session) -> Result<()> {
    match session.error_message() {
        Some(message) => Err(PatentError::Session(message.to_string())),
        None => Ok(()),
    }
}

/// Select the file and load its columns (auto-selection included)
pub async fn discover_columns(client: &ApiClient, session: &mut Session, file: UploadFile) -> Result<()> {
    let request = session.select_file(file);

    let bar = spinner("Loading columns...");
    let outcome = client
        .fetch_columns(&request.file)
        .await
        .map_err(|e| e.detail());
    bar.finish_and_clear();

    if let Err(detail) = &outcome {
        tracing::debug!(%detail, "column discovery failed");
    }
    if session.columns_loaded(request.token, outcome) == Completion::Stale {
        tracing::warn!(token = request.token.value(), "discarded stale column response");
    }

    session_failure(session)
}

/// Apply `--title-col`/`--abstract-col`/`--claims-col` over the auto picks
///
/// Overridden fields are cleared first so an override may take a column
/// that auto-selection gave to another field; that field is then refilled
/// with the first column still free.
pub fn apply_column_overrides(session: &mut Session, overrides: &ColumnOverrides) -> Result<()> {
    if overrides.is_empty() {
        return Ok(());
    }

    for field in ColumnField::ALL {
        if overrides.get(field).is_some() {
            session.set_column(field, None)?;
        }
    }

    for field in ColumnField::ALL {
        let Some(column) = overrides.get(field) else { continue };
        if let Some(holder) = session.selection().assigned_elsewhere(field, column) {
            if overrides.get(holder).is_none() {
                session.set_column(holder, None)?;
            }
        }
        session.set_column(field, Some(column.to_string()))?;
    }

    for field in ColumnField::ALL {
        if session.column(field).is_none() {
            let free = session.available_columns(field).first().map(|c| c.to_string());
            if let Some(column) = free {
                tracing::debug!(%field, %column, "refilled column after override");
                session.set_column(field, Some(column))?;
            }
        }
    }

    Ok(())
}

/// Pick each column from a list; the auto pick is preselected
pub fn choose_columns_interactively(session: &mut Session) -> Result<()> {
    let theme = ColorfulTheme::default();
    let previous: Vec<Option<String>> = ColumnField::ALL
        .iter()
        .map(|f| session.column(*f).map(str::to_string))
        .collect();

    for field in ColumnField::ALL {
        session.set_column(field, None)?;
    }

    for (field, previous) in ColumnField::ALL.into_iter().zip(previous) {
        let items: Vec<String> = session
            .available_columns(field)
            .into_iter()
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            break;
        }

        let default = previous
            .and_then(|p| items.iter().position(|c| *c == p))
            .unwrap_or(0);
        let index = Select::with_theme(&theme)
            .with_prompt(field.label())
            .items(items.as_slice())
            .default(default)
            .interact()?;
        session.set_column(field, Some(items[index].clone()))?;
    }

    Ok(())
}

/// Offer to open the prompt in `$EDITOR`
pub fn edit_prompt_interactively(session: &mut Session) -> Result<()> {
    println!("Prompt:\n{}\n", session.prompt());

    let edit = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Edit the prompt?")
        .default(false)
        .interact()?;
    if !edit {
        return Ok(());
    }

    if let Some(text) = Editor::new().edit(session.prompt())? {
        session.set_prompt(text.trim_end().to_string());
    }
    Ok(())
}

/// Prompt from `--prompt`, `--prompt-file` or the configured default
pub fn resolve_prompt(inline: Option<String>, file: Option<&Path>, fallback: &str) -> Result<String> {
    if let Some(prompt) = inline {
        return Ok(prompt);
    }
    if let Some(path) = file {
        if !path.is_file() {
            return Err(PatentError::FileNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        return Ok(text.trim_end().to_string());
    }
    Ok(fallback.to_string())
}

/// Validate, submit and apply the analysis outcome
///
/// Validation failures return before any request is sent.
pub async fn run_analysis(client: &ApiClient, session: &mut Session, options: &AnalyzeOptions) -> Result<()> {
    options.validate()?;

    let missing = missing_summary_fields(session.prompt());
    if !missing.is_empty() {
        tracing::warn!(fields = ?missing, "prompt does not mention every summary field");
    }

    let request = session.submit()?;

    let bar = spinner("Analyzing patents...");
    let outcome = client
        .analyze(&request, options)
        .await
        .map_err(|e| e.detail());
    bar.finish_and_clear();

    if session.analysis_finished(request.token, outcome) == Completion::Stale {
        tracing::warn!(token = request.token.value(), "discarded stale analysis response");
    }

    session_failure(session)
}
