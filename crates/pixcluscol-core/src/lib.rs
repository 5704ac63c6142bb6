pub mod annotator;
pub mod codec;
pub mod color;
pub mod config;
pub mod consts;
pub mod error;
pub mod io;
pub mod labels;
pub mod masks;
pub mod picker;

pub use annotator::{Annotator, Event, Key, SessionMode, Shown};
pub use codec::Annotation;
pub use config::AnnotatorConfig;
pub use error::{AnnotatorError, Result};
