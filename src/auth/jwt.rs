use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use super::Claims;
use crate::error::AppError;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as usize)
        .unwrap_or_default()
}

pub fn make_session_claims(user_id: &Uuid, session_id: &Uuid, ttl_secs: u64) -> Claims {
    let iat = now_unix();
    Claims {
        sub: user_id.to_string(),
        sid: session_id.to_string(),
        iat,
        exp: iat.saturating_add(ttl_secs as usize),
    }
}

pub fn encode_token(keys: &JwtKeys, claims: &Claims) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| AppError::internal_with_source("Session token encoding failed", err))
}

pub fn decode_token(keys: &JwtKeys, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    Ok(decode::<Claims>(token, &keys.dec, &validation)?.claims)
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::unauthorized(format!("Invalid or expired session: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{JwtKeys, decode_token, encode_token, make_session_claims};
    use crate::{auth::Claims, error::AppError};

    #[test]
    fn claims_carry_user_session_and_ttl() {
        let (user_id, session_id) = (Uuid::new_v4(), Uuid::new_v4());
        let claims = make_session_claims(&user_id, &session_id, 90);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.sid, session_id.to_string());
        assert_eq!(claims.exp - claims.iat, 90);
    }

    #[test]
    fn token_round_trips_with_same_secret() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let claims = make_session_claims(&Uuid::new_v4(), &Uuid::new_v4(), 600);
        let token = encode_token(&keys, &claims).expect("token should encode");

        assert_eq!(decode_token(&keys, &token).expect("token should decode"), claims);
    }

    #[test]
    fn foreign_secret_is_unauthorized() {
        let claims = make_session_claims(&Uuid::new_v4(), &Uuid::new_v4(), 600);
        let token = encode_token(&JwtKeys::from_secret(b"secret-one"), &claims)
            .expect("token should encode");

        let err = decode_token(&JwtKeys::from_secret(b"secret-two"), &token)
            .expect_err("signature should not verify");
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(err.message().starts_with("Invalid or expired session:"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            sid: Uuid::new_v4().to_string(),
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode_token(&keys, &claims).expect("token should encode");

        assert!(decode_token(&keys, &token).is_err());
    }
}
