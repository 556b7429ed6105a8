pub mod models;
pub mod paginate;
pub mod payloads;
pub mod shape;

pub use models::{
    ContributionSummary, NormalizedResponse, Page, PageInfo, PaginationEnvelope, ProfileStats,
};
pub use paginate::{paginate, project_created_at};
pub use payloads::{
    CommentCountPayload, GistPayload, PullRequestPayload, RepoPayload, UserPayload, UserRef,
};
pub use shape::{resource_key, ResponseShaper};
