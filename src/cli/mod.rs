//! Command-line front end.
//!
//! Parses arguments into [`Commands`] and hands them to [`run`], which
//! drives a [`DraftingService`](crate::application::DraftingService).
//! Section and outline indices are zero-based, as printed by `projects show`.

mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::foundation::ProjectId;
use crate::domain::project::ProjectType;

pub use run::{run, CliContext};

/// Top-level CLI parser for the `draftdeck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "draftdeck",
    version,
    about = "Draft documents and slide decks with an AI collaborator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create, list, inspect and delete projects
    #[command(subcommand)]
    Projects(ProjectCommands),

    /// Edit or suggest a project's outline
    #[command(subcommand)]
    Outline(OutlineCommands),

    /// Generate content from the outline
    Generate {
        id: ProjectId,

        /// Replace existing content instead of generating it for the first time
        #[arg(long)]
        regenerate: bool,
    },

    /// Discard generated content so the outline can change again
    Discard { id: ProjectId },

    /// Rewrite one section following an instruction
    Refine {
        #[command(flatten)]
        target: SectionTarget,

        /// What to change
        instruction: String,
    },

    /// Mark a section as liked
    Like {
        #[command(flatten)]
        target: SectionTarget,
    },

    /// Mark a section as disliked and have it rewritten
    Dislike {
        #[command(flatten)]
        target: SectionTarget,

        /// What is wrong with it; used as the rewrite instruction
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Attach a private note to a section
    Note {
        #[command(flatten)]
        target: SectionTarget,

        note: String,
    },

    /// Export a ready project as DOCX or PPTX
    Export {
        id: ProjectId,

        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// List your projects
    List,

    /// Show a project's outline and sections
    Show { id: ProjectId },

    /// Create a project
    Create {
        topic: String,

        /// docx (document) or pptx (slide deck)
        #[arg(short = 't', long = "type", default_value = "docx")]
        project_type: ProjectType,

        /// Initial outline entry; repeat for several
        #[arg(short, long = "outline")]
        outline: Vec<String>,
    },

    /// Delete a project with its outline and content
    Delete { id: ProjectId },
}

#[derive(Debug, Subcommand)]
pub enum OutlineCommands {
    /// Append an entry
    Add { id: ProjectId, title: String },

    /// Remove the entry at INDEX
    Remove { id: ProjectId, index: usize },

    /// Rename the entry at INDEX
    Update {
        id: ProjectId,
        index: usize,
        title: String,
    },

    /// Move the entry at FROM to position TO
    Move { id: ProjectId, from: usize, to: usize },

    /// Ask the AI collaborator for an outline
    Suggest {
        id: ProjectId,

        /// Replace the current outline with the suggestion
        #[arg(long)]
        apply: bool,
    },
}

/// A section of a project, with an optional revision guard.
#[derive(Debug, Clone, Args)]
pub struct SectionTarget {
    pub id: ProjectId,

    pub index: usize,

    /// Fail instead of overwriting if the section changed since this revision
    #[arg(long = "expect-revision", value_name = "REV")]
    pub expect_revision: Option<u32>,
}
