//! Core domain logic for dealpost.
//!
//! Holds everything that does not touch the network: the product record and
//! platform types, the externally supplied rule set, environment-based app
//! configuration, title/gender/quantity derivation, price normalization,
//! reply formatting, and inbound-message text scanning. Fetching and HTML
//! extraction live in `dealpost-scraper`.

pub mod config;
pub mod error;
pub mod format;
pub mod message;
pub mod price;
pub mod record;
pub mod rules;
pub mod title;

pub use config::{load_app_config, AppConfig};
pub use error::ConfigError;
pub use format::format_post;
pub use record::{Gender, Platform, ProductRecord};
pub use rules::{load_rules, RulesFile};
