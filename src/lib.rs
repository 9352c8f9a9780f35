//! arco - A strict, deterministic, explainable classification engine
//!
//! Loads a fact graph, closes it under a fixed rule catalog, validates the
//! closure against structural shapes, evaluates evidentiary gates, traces
//! the supporting path and projects one immutable determination into
//! machine-readable, graph-native and human-readable artifacts.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod determination;
pub mod gates;
pub mod graph;
pub mod observability;
pub mod pipeline;
pub mod projector;
pub mod rules;
pub mod shapes;
pub mod trace;
pub mod vocab;
