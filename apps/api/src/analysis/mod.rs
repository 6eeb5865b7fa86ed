//! Resume ↔ job-description match analysis.
//!
//! Stages, leaves first: [`normalize`] → [`sections`] → [`skills`] (over
//! [`taxonomy`], via [`nlp`]) → [`weighting`] → [`section_score`] →
//! [`composite`] → [`suggestions`]. [`pipeline::Analyzer`] runs them in order;
//! [`service`] and [`handlers`] put it behind HTTP.

pub mod composite;
pub mod handlers;
pub mod nlp;
pub mod normalize;
pub mod pipeline;
pub mod section_score;
pub mod sections;
pub mod service;
pub mod skills;
pub mod suggestions;
pub mod taxonomy;
pub mod weighting;

pub use pipeline::{AnalysisResult, Analyzer};
