#![doc = "notion-pages-core: core logic library for notion-pages."]

//! This crate turns Notion pages into static HTML. It has no CLI concerns.
//!
//! # Layout
//! - [`model`]: blocks, rich-text runs and pages.
//! - [`rich_text`], [`list`], [`transform`]: the block-tree to markup renderer.
//! - [`assemble`]: renders a full page through a [`contract::ContentSource`] and templates.
//! - [`notion`]: the Notion API content source.
//! - [`template`], [`site`]: template rendering and publishing to a directory.

pub mod assemble;
pub mod config;
pub mod contract;
pub mod error;
pub mod list;
pub mod markup;
pub mod model;
pub mod notion;
pub mod rich_text;
pub mod site;
pub mod template;
pub mod transform;

pub use assemble::{PageAssembler, RenderedPage};
pub use error::{PublishError, RenderError, SourceError, TemplateError};
