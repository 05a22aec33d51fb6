//! Pipeline stages for PDF-to-text conversion.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested by feeding it a finite input and asserting the exact output.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ reflow ──▶ fence ──▶ text
//! (paths)   (pdfium)    (merge)    (blocks)
//! ```
//!
//! 1. [`input`]    — discover PDF files and check their magic bytes
//! 2. [`extract`]  — pages of whitespace-normalised lines, margins removed;
//!    runs in `spawn_blocking` because pdfium is synchronous
//! 3. [`classify`] — shape of a single line, used by both passes below
//! 4. [`reflow`]   — merge pass rebuilding wrapped lines and attaching amounts
//! 5. [`fence`]    — annotation pass fencing ledger entries, then rendering

pub mod classify;
pub mod extract;
pub mod fence;
pub mod input;
pub mod reflow;
