#![forbid(unsafe_code)]

//! # scriptorium-dom
//!
//! Document seam for the scriptorium loading engine.
//!
//! The engine never talks to a real document directly. It builds a
//! [`ScriptElement`], picks an [`InjectTarget`], and hands both to a
//! [`Host`], the embedder-supplied collaborator that owns element
//! creation, appending, and settlement. [`MemHost`] is a first-class
//! in-memory host for headless embedders and tests.

mod element;
mod host;
mod mem;

pub use element::{ScriptElement, data_attribute_name};
pub use host::{Host, InjectError, InjectResult, InjectTarget};
pub use mem::{Appended, MemHost};
