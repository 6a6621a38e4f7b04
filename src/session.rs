use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims we read from an access token issued by the auth backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id.
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
}

/// Who is making the request. Passed explicitly to every operation that
/// needs an owner; transitions return a new value instead of mutating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        owner_id: Uuid,
        email: Option<String>,
        #[serde(skip)]
        access_token: String,
        expires_at: DateTime<Utc>,
    },
}

impl Session {
    pub fn sign_in(self, claims: Claims, access_token: impl Into<String>) -> Session {
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Session::Authenticated {
            owner_id: claims.sub,
            email: claims.email,
            access_token: access_token.into(),
            expires_at,
        }
    }

    pub fn sign_out(self) -> Session {
        Session::Anonymous
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        match self {
            Session::Authenticated { owner_id, .. } => Some(*owner_id),
            Session::Anonymous => None,
        }
    }
}
