//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module   | TOML Section | Purpose                                    |
//! |----------|--------------|--------------------------------------------|
//! | `source` | `[src]`      | Source root, ToC file, pick/drop patterns  |
//! | `dest`   | `[dest]`     | HTML root, artifact dir, namespace         |
//! | `bundle` | `[bundle]`   | Artifact names, public URL, init scripts   |
//! | `title`  | `[title]`    | Page title composition                     |
//! | `build`  | `[build]`    | Minification, task concurrency             |
//! | `nav`    | `[nav]`      | Soft navigation element ids                |

mod build;
mod bundle;
mod dest;
mod nav;
mod source;
mod title;

pub use build::BuildSectionConfig;
pub use bundle::BundleConfig;
pub use dest::DestConfig;
pub use nav::NavConfig;
pub use source::SourceConfig;
pub use title::TitleConfig;
