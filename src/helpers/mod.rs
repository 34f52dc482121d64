//! Small string helpers shared by the templates, assembler and finalizer

mod html;
mod url;

pub use html::*;
pub use url::*;
