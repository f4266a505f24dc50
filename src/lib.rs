pub mod alpha_beta_searcher;
pub mod board;
pub mod chess_search;
pub mod engine;
pub mod evaluate;

#[cfg(feature = "instrumentation")]
pub mod instrumentation;
