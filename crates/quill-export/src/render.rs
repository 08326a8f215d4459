//! # Note Rendering
//!
//! Content and file name for one note.

use quill_core::{Note, TaskItem};
use rand::Rng;

/// Untitled notes get `new-note-<n>` with `n` drawn from `0..GENERATED_NAME_RANGE`.
pub const GENERATED_NAME_RANGE: u32 = 10_000;

/// The Markdown body of a note.
///
/// List notes are rendered from their task list, one `-[x] ` or `-[] ` line
/// per item in list order, joined by newlines; `content` is ignored for them.
/// Other notes use `content` verbatim, or nothing.
pub fn render_content(note: &Note) -> String {
    if note.is_list() {
        note.task_list
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(render_task)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        note.content.clone().unwrap_or_default()
    }
}

fn render_task(task: &TaskItem) -> String {
    let mark = if task.is_done { "x" } else { "" };
    format!("-[{mark}] {}", task.content)
}

/// The file name of a note without its extension.
///
/// A non-empty title is used with every `/` replaced by `-`. Otherwise a
/// name is generated from `rng`.
pub fn file_stem<R: Rng + ?Sized>(note: &Note, rng: &mut R) -> String {
    match note.title_text() {
        Some(title) => title.replace('/', "-"),
        None => format!("new-note-{}", rng.gen_range(0..GENERATED_NAME_RANGE)),
    }
}
