//! Executes parsed commands and renders their results as plain text.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::adapters::export::LocalExportSink;
use crate::application::{DraftingService, GiveFeedbackCommand, RefineSectionCommand};
use crate::domain::project::{Project, ProjectSummary, SectionFeedback, SectionRevision};
use crate::ports::ExportSink;

use super::{Commands, OutlineCommands, ProjectCommands, SectionTarget};

/// What a command runs against.
pub struct CliContext {
    pub service: DraftingService,
    /// Used by `export` when `--out` is not given.
    pub export_dir: PathBuf,
}

/// Runs one command, writing human-readable output to `out`.
pub async fn run(command: Commands, ctx: &CliContext, out: &mut impl Write) -> anyhow::Result<()> {
    let service = &ctx.service;

    match command {
        Commands::Projects(ProjectCommands::List) => {
            let projects = service.list_projects().await?;
            render_summaries(&projects, out)?;
        }
        Commands::Projects(ProjectCommands::Show { id }) => {
            let handle = service.open_project(id).await?;
            render_project(&handle.snapshot().await, out)?;
        }
        Commands::Projects(ProjectCommands::Create {
            topic,
            project_type,
            outline,
        }) => {
            let handle = service
                .create_project_with_outline(&topic, project_type, outline)
                .await?;
            let project = handle.snapshot().await;
            writeln!(out, "Created project {} ({})", project.id(), project.project_type().label())?;
        }
        Commands::Projects(ProjectCommands::Delete { id }) => {
            let handle = service.open_project(id).await?;
            service.delete_project(&handle).await?;
            writeln!(out, "Deleted project {}", id)?;
        }
        Commands::Outline(edit) => run_outline(edit, service, out).await?,
        Commands::Generate { id, regenerate } => {
            let handle = service.open_project(id).await?;
            let project = if regenerate {
                service.regenerate(&handle).await?
            } else {
                service.generate(&handle).await?
            };
            render_project(&project, out)?;
        }
        Commands::Discard { id } => {
            let handle = service.open_project(id).await?;
            let project = service.discard_content(&handle).await?;
            writeln!(out, "Discarded content of project {} ({})", id, project.status())?;
        }
        Commands::Refine {
            target,
            instruction,
        } => {
            let handle = service.open_project(target.id).await?;
            let mut cmd = RefineSectionCommand::new(target.index, instruction);
            if let Some(revision) = expected_revision(&target) {
                cmd = cmd.expecting(revision);
            }
            let result = service.refine_section(&handle, cmd).await?;
            render_project(&result.project, out)?;
        }
        Commands::Like { target } => {
            let handle = service.open_project(target.id).await?;
            let mut cmd = GiveFeedbackCommand::like(target.index);
            if let Some(revision) = expected_revision(&target) {
                cmd = cmd.expecting(revision);
            }
            service.give_feedback(&handle, cmd).await?;
            writeln!(out, "Liked section {}", target.index)?;
        }
        Commands::Dislike { target, comment } => {
            let handle = service.open_project(target.id).await?;
            let mut cmd = GiveFeedbackCommand::dislike(target.index, comment);
            if let Some(revision) = expected_revision(&target) {
                cmd = cmd.expecting(revision);
            }
            let result = service.give_feedback(&handle, cmd).await?;
            render_project(&result.project, out)?;
        }
        Commands::Note { target, note } => {
            let handle = service.open_project(target.id).await?;
            service.save_note(&handle, target.index, &note).await?;
            writeln!(out, "Saved note on section {}", target.index)?;
        }
        Commands::Export { id, out: dir } => {
            let handle = service.open_project(id).await?;
            let document = service.export(&handle).await?;
            let sink = LocalExportSink::new(dir.unwrap_or_else(|| ctx.export_dir.clone()));
            let path = sink
                .store(&document)
                .await
                .with_context(|| format!("failed to save {}", document.filename))?;
            writeln!(out, "Exported {} ({} bytes)", path.display(), document.len())?;
        }
    }

    Ok(())
}

async fn run_outline(
    command: OutlineCommands,
    service: &DraftingService,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let project = match command {
        OutlineCommands::Add { id, title } => {
            let handle = service.open_project(id).await?;
            service.add_outline_item(&handle, &title).await?
        }
        OutlineCommands::Remove { id, index } => {
            let handle = service.open_project(id).await?;
            service.remove_outline_item(&handle, index).await?
        }
        OutlineCommands::Update { id, index, title } => {
            let handle = service.open_project(id).await?;
            service.update_outline_item(&handle, index, &title).await?
        }
        OutlineCommands::Move { id, from, to } => {
            let handle = service.open_project(id).await?;
            service.move_outline_item(&handle, from, to).await?
        }
        OutlineCommands::Suggest { id, apply } => {
            let handle = service.open_project(id).await?;
            let titles = service.suggest_outline(&handle).await?;
            if !apply {
                writeln!(out, "Suggested outline:")?;
                render_titles(&titles[..], out)?;
                return Ok(());
            }
            service.replace_outline(&handle, titles).await?
        }
    };

    render_titles(project.outline().titles(), out)?;
    Ok(())
}

fn expected_revision(target: &SectionTarget) -> Option<SectionRevision> {
    target.expect_revision.map(SectionRevision::from_raw)
}

fn render_summaries(projects: &[ProjectSummary], out: &mut impl Write) -> std::io::Result<()> {
    if projects.is_empty() {
        return writeln!(out, "No projects yet.");
    }
    for p in projects {
        writeln!(
            out,
            "{:>5}  {}  {:<4}  {:<10}  {}",
            p.id.as_i64(),
            p.created_at.date_label(),
            p.project_type.as_str(),
            p.status.to_string(),
            p.topic
        )?;
    }
    Ok(())
}

fn render_titles<S: AsRef<str>>(titles: &[S], out: &mut impl Write) -> std::io::Result<()> {
    for (index, title) in titles.iter().enumerate() {
        writeln!(out, "  [{}] {}", index, title.as_ref())?;
    }
    Ok(())
}

fn render_project(project: &Project, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "#{} {} ({}, {})",
        project.id(),
        project.topic(),
        project.project_type().label(),
        project.status()
    )?;

    writeln!(out, "Outline:")?;
    if project.outline().is_empty() {
        writeln!(out, "  (empty)")?;
    }
    render_titles(project.outline().titles(), out)?;

    let Some(content) = project.generated_content() else {
        return Ok(());
    };
    for (index, section) in content.iter().enumerate() {
        writeln!(out)?;
        let tag = match section.feedback() {
            SectionFeedback::None => String::new(),
            feedback => format!(" [{}]", feedback),
        };
        writeln!(out, "[{}] {} ({}){}", index, section.title(), section.revision(), tag)?;
        if let Some(comment) = section.comment() {
            writeln!(out, "    comment: {}", comment)?;
        }
        if !section.note().is_empty() {
            writeln!(out, "    note: {}", section.note())?;
        }
        writeln!(out, "{}", section.content())?;
    }
    Ok(())
}
