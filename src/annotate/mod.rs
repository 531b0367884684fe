pub mod annotator;
pub mod avatar;
pub mod batch;

pub use annotator::{AnnotationReport, AnnotationTarget, Annotator, CommitSource};
pub use avatar::AvatarCache;
