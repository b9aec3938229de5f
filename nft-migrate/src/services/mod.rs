pub mod bucket;
pub mod chain;
pub mod fetcher;
pub mod migration;
pub mod rewriter;
pub mod staging;
