//! Folio - documentation site builder.
//!
//! Markdown sources go through an asynchronous page pipeline into HTML
//! pages, plus one site-wide script bundle and one stylesheet. Built pages
//! navigate softly through [`nav`].

pub mod asset;
pub mod build;
pub mod cli;
pub mod config;
pub mod content;
pub mod hooks;
pub mod logger;
pub mod nav;
pub mod utils;
