pub mod client;
pub mod comments;
pub mod contributions;
pub mod identity;
pub mod listings;
pub mod metrics;
pub mod profile;
pub mod service;

pub use client::{PullState, RestClient};
pub use comments::{CommentAggregator, CommentKind};
pub use contributions::{
    format_window_bound, parse_window_bound, ContributionCounter, ContributionWindow,
};
pub use identity::{current_login, resolve_shaper};
pub use listings::Listings;
pub use profile::ProfileStatsCollector;
pub use service::ActivityService;
