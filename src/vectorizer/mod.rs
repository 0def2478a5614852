pub mod corpus;
pub mod rank;
pub mod term;
pub mod tfidf;
pub mod token;
