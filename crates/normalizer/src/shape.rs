use std::collections::BTreeMap;

use common::text::capitalize;

use crate::models::{NormalizedResponse, Page, PageInfo, PaginationEnvelope};

/// `resource_type` followed by the capitalized `resource`, e.g. `gistComments`.
pub fn resource_key(resource_type: &str, resource: &str) -> String {
    format!("{resource_type}{}", capitalize(resource))
}

/// Wraps REST pages in the GraphQL-shaped envelope. Holds the caller's login,
/// resolved once per request, so every shaped page reports the same identity.
#[derive(Debug, Clone)]
pub struct ResponseShaper {
    login: String,
}

impl ResponseShaper {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn shape<T>(
        &self,
        page: Page<T>,
        resource: &str,
        resource_type: &str,
        has_next_page: bool,
    ) -> NormalizedResponse<T> {
        let total_count = page.nodes.len();
        let envelope = PaginationEnvelope {
            nodes: page.nodes,
            total_count,
            has_next_page,
        };
        let mut user = BTreeMap::new();
        user.insert(resource_key(resource_type, resource), envelope);

        NormalizedResponse {
            user,
            page_info: PageInfo {
                total_count,
                has_next_page,
            },
            login: self.login.clone(),
        }
    }

    /// Shapes a full page sequence; every page but the last has a next page.
    pub fn shape_all<T>(
        &self,
        pages: Vec<Page<T>>,
        resource: &str,
        resource_type: &str,
    ) -> Vec<NormalizedResponse<T>> {
        let last = pages.len().saturating_sub(1);
        pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| self.shape(page, resource, resource_type, index < last))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn page(size: usize) -> Page<Value> {
        Page {
            nodes: (0..size).map(|i| json!({ "n": i })).collect(),
        }
    }

    #[test]
    fn key_joins_type_and_capitalized_resource() {
        let shaped = ResponseShaper::new("octocat").shape(page(0), "comments", "gist", false);
        assert!(shaped.envelope("gistComments").is_some());
        assert_eq!(resource_key("issue", "COMMENTS"), "issueComments");
    }

    #[test]
    fn total_count_is_the_page_size() {
        let shaped = ResponseShaper::new("octocat").shape(page(4), "comments", "commit", true);
        assert_eq!(shaped.page_info.total_count, 4);
        assert!(shaped.page_info.has_next_page);
        assert_eq!(shaped.envelope("commitComments").unwrap().total_count, 4);
    }

    #[test]
    fn only_the_last_page_has_no_next_page() {
        let shaper = ResponseShaper::new("octocat");
        let shaped = shaper.shape_all(vec![page(10), page(10), page(3)], "comments", "gist");
        let flags: Vec<bool> = shaped.iter().map(|r| r.page_info.has_next_page).collect();
        assert_eq!(flags, vec![true, true, false]);
        let counts: Vec<usize> = shaped.iter().map(|r| r.page_info.total_count).collect();
        assert_eq!(counts, vec![10, 10, 3]);
    }

    #[test]
    fn serializes_in_graphql_shape() {
        let shaped = ResponseShaper::new("octocat").shape(page(1), "comments", "gist", false);
        assert_eq!(
            serde_json::to_value(&shaped).unwrap(),
            json!({
                "user": {
                    "gistComments": {
                        "nodes": [{"n": 0}],
                        "totalCount": 1,
                        "hasNextPage": false
                    }
                },
                "pageInfo": {"totalCount": 1, "hasNextPage": false},
                "login": "octocat"
            })
        );
    }
}
