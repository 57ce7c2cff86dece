//! Content handlers - generation, discarding and section notes.

mod discard_content;
mod generate_content;
mod save_note;

pub use discard_content::DiscardContentHandler;
pub use generate_content::{
    GenerateContentCommand, GenerateContentHandler, GenerateContentResult, GenerationMode,
};
pub use save_note::{SaveNoteCommand, SaveNoteHandler};
