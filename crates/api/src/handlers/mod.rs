pub mod account;
pub mod analytics;
pub mod association;
pub mod auth;
pub mod catalog;
pub mod contract;
pub mod dashboard;
pub mod episode;
pub mod feedback;
pub mod producer;
pub mod production_house;
pub mod reference;
pub mod schedule;
pub mod series;
