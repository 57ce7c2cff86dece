//! Draftdeck - project content lifecycle for AI-assisted drafting.
//!
//! A project moves from a topic to an outline, from the outline to
//! generated sections, through per-section refinement and feedback, and
//! finally out as a DOCX document or PPTX slide deck. Persistence, the AI
//! collaborators and rendering live behind ports; this crate owns the
//! lifecycle rules and the ordering of edits.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
