//! Stress predictor adapters

mod heuristic_predictor;

pub use heuristic_predictor::HeuristicStressPredictor;
