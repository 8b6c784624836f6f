mod event;
mod source;

pub use event::RawEvent;
pub use source::SourceFile;
