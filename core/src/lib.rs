pub mod allocator;
pub mod area_pass;
pub mod config;
pub mod context;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod model;
pub mod pass;
pub mod pools;
pub mod primary_rank_pass;
pub mod relaxation_pass;
pub mod report;
pub mod rng;
pub mod senior_pool_pass;
pub mod shortage;
pub mod snapshot;
pub mod stats;
pub mod types;
pub mod verification_pass;
