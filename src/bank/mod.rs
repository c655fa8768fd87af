pub mod document;
pub mod pair;
pub mod pairbank;
pub mod score;
pub mod term;
pub mod termbank;

mod rank;

pub use document::DocumentIdentifier;
pub use pair::UnorderedTermPair;
pub use pairbank::{PairMap, PairStatistics, PairStatisticsBuilder};
pub use score::ScoreType;
pub use term::Term;
pub use termbank::{DocumentSet, TermMap, TermStatistics, TermStatisticsBuilder};
