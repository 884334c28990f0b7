//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&PgPool` as the first argument. Multi-statement writes take a
//! [`RetryPolicy`](crate::retry::RetryPolicy) and run through
//! [`transaction_with_retry`](crate::retry::transaction_with_retry); their
//! single-transaction bodies are exposed as `*_in` functions over
//! `&mut PgConnection` so callers can compose them.

pub mod analytics_repo;
pub mod association_repo;
pub mod catalog_repo;
pub mod contract_repo;
pub mod dashboard_repo;
pub mod episode_repo;
pub mod feedback_repo;
pub mod login_repo;
pub mod password_reset_repo;
pub mod producer_repo;
pub mod production_house_repo;
pub mod reference_repo;
pub mod schedule_repo;
pub mod user_account_repo;
pub mod web_series_repo;

pub use analytics_repo::AnalyticsRepo;
pub use association_repo::AssociationRepo;
pub use catalog_repo::CatalogRepo;
pub use contract_repo::ContractRepo;
pub use dashboard_repo::DashboardRepo;
pub use episode_repo::EpisodeRepo;
pub use feedback_repo::FeedbackRepo;
pub use login_repo::LoginRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use producer_repo::ProducerRepo;
pub use production_house_repo::{HouseDeleteOutcome, ProductionHouseRepo};
pub use reference_repo::ReferenceRepo;
pub use schedule_repo::ScheduleRepo;
pub use user_account_repo::UserAccountRepo;
pub use web_series_repo::WebSeriesRepo;
