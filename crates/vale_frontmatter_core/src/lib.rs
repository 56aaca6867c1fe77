//! # vale_frontmatter_core
//!
//! Lints the front matter of markdown documents with an external prose linter.
//!
//! Each document's front matter is rewritten into a line-preserving
//! projection: the `title` becomes a heading and the `description` (or
//! `summary`) stays on the line that declares it, everything else is blank.
//! The projections are written to a temporary cache root that mirrors the
//! working directory, the linter is run against it, and its output is
//! rewritten so diagnostics point at the original files.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vale_frontmatter_core::{FrontmatterLinter, LintConfig};
//!
//! let linter = FrontmatterLinter::new(LintConfig::default(), ".");
//! let report = linter.lint_patterns(&["content/**/*.md".to_string()])?;
//! std::io::stdout().write_all(&report.output)?;
//! std::process::exit(report.status);
//! ```

pub mod cache;
mod config;
mod error;
pub mod file_finder;
pub mod frontmatter;
pub mod invoker;
pub mod key_index;
mod linter;
pub mod projection;
pub mod rewriter;

pub use cache::ProjectionCache;
pub use config::LintConfig;
pub use error::FrontmatterError;
pub use frontmatter::{DelimiterSpan, MetadataBlock};
pub use invoker::{LintInvoker, LintOutput};
pub use key_index::KeyLineIndex;
pub use linter::{FrontmatterLinter, LintReport};
pub use projection::{Projection, project_document};
pub use rewriter::rewrite_output;
