use serde::{Deserialize, Serialize};

use crate::context::Identity;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // user id
    pub sid: String, // session row id
    pub iat: usize,
    pub exp: usize,
}

/// A freshly opened session: the signed cookie value plus who it belongs to.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_in: u64,
    pub identity: Identity,
}
