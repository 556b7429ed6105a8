use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ViewerDto {
    pub viewer: LoginDto,
}

#[derive(Debug, Serialize)]
pub struct LoginDto {
    pub login: String,
}

impl ViewerDto {
    pub fn new(login: String) -> Self {
        Self {
            viewer: LoginDto { login },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub pg_size: Option<i64>,
}
