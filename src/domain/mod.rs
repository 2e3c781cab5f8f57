pub mod language;
pub mod news;
pub mod read_record;

pub use language::Language;
pub use news::{format_time, NewsItem};
pub use read_record::ReadRecord;
