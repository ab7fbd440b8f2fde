mod save;
mod search;
mod wiki;

pub use save::SaveToFile;
pub use search::SearchWeb;
pub use wiki::WikiLookup;
