//! Loader for the Figura scene description format.
//!
//! Scene descriptions are line-oriented text: a `@name` line opens a group,
//! `END` commits it, and every other non-blank line is one statement adding
//! an entity to the open group. Statements reference previously declared
//! points by arena-style `ADDR<n>` indices, which this loader resolves while
//! building, so the [`Scenes`](figura_core::scene::Scenes) it returns contain
//! no unresolved references.
//!
//! The public entry point is [`load_scenes`]; failures surface as a single
//! [`LoadError`] with the 1-based line number and the byte span of the
//! offending line.
//!
//! ```
//! let source = "\
//! @right-triangle
//! POINT 100 400 8 white
//! POINT 400 400 8 white
//! LINE ADDR0 ADDR1 2 red
//! END
//! ";
//! let scenes = figura_parser::load_scenes(source).unwrap();
//! assert_eq!(scenes.len(), 1);
//! ```

pub mod error;
pub mod loader;

pub use error::{LoadError, LoadErrorKind};
pub use loader::load_scenes;
