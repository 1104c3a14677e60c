//! Defines functions for handling user authentication with cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

pub(crate) const COOKIE_TOKEN: &str = "token";

/// The default duration for which auth cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::hours(8);

/// The contents of the auth cookie: who is logged in and until when.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub user_id: UserID,
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Encode the token as the cookie value.
    ///
    /// The expiry is stored as a unix timestamp to avoid any date formatting
    /// round-trip issues.
    fn encode(&self) -> String {
        format!("{}:{}", self.user_id.as_i64(), self.expires_at.unix_timestamp())
    }

    fn decode(value: &str) -> Option<Self> {
        let (raw_user_id, raw_expiry) = value.split_once(':')?;
        let user_id = UserID::new(raw_user_id.parse().ok()?);
        let expires_at = OffsetDateTime::from_unix_timestamp(raw_expiry.parse().ok()?).ok()?;

        Some(Self {
            user_id,
            expires_at,
        })
    }
}

/// Add an auth cookie to the cookie jar, indicating that a user is logged in
/// and authenticated.
///
/// Sets the expiry of the cookie to `duration` from the current time. You can
/// use [DEFAULT_COOKIE_DURATION] for the default duration.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> PrivateCookieJar {
    let expires_at = OffsetDateTime::now_utc() + duration;
    let token = Token {
        user_id,
        expires_at,
    };

    jar.add(
        Cookie::build((COOKIE_TOKEN, token.encode()))
            .expires(expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the auth token from the cookie jar and check that it has not expired.
///
/// # Errors
/// Returns [Error::CookieMissing] if there is no auth cookie, or
/// [Error::InvalidCredentials] if the cookie cannot be decoded or has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token = Token::decode(cookie.value()).ok_or(Error::InvalidCredentials)?;

    if token.expires_at < OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    Ok(token)
}

/// Remove the auth cookie from the jar, logging the user out.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::from(COOKIE_TOKEN))
}

#[cfg(test)]
mod token_tests {
    use time::{Duration, OffsetDateTime};

    use crate::UserID;

    use super::Token;

    #[test]
    fn encode_decode_round_trip() {
        let expires_at =
            OffsetDateTime::from_unix_timestamp(OffsetDateTime::now_utc().unix_timestamp())
                .unwrap();
        let token = Token {
            user_id: UserID::new(42),
            expires_at,
        };

        let decoded = Token::decode(&token.encode()).unwrap();

        assert_eq!(decoded, token);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(Token::decode("not a token"), None);
        assert_eq!(Token::decode("1:not-a-timestamp"), None);
        assert_eq!(Token::decode(""), None);
    }

    #[test]
    fn decode_keeps_expiry() {
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(1);
        let token = Token {
            user_id: UserID::new(1),
            expires_at,
        };

        let decoded = Token::decode(&token.encode()).unwrap();

        assert_eq!(
            decoded.expires_at.unix_timestamp(),
            expires_at.unix_timestamp()
        );
    }
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use time::Duration;

    use crate::{Error, UserID};

    use super::{get_token_from_cookies, invalidate_auth_cookie, set_auth_cookie};

    fn test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::generate())
    }

    #[test]
    fn set_then_get_round_trip() {
        let jar = set_auth_cookie(test_jar(), UserID::new(7), Duration::hours(1));

        let token = get_token_from_cookies(&jar).unwrap();

        assert_eq!(token.user_id, UserID::new(7));
    }

    #[test]
    fn missing_cookie_is_an_error() {
        let result = get_token_from_cookies(&test_jar());

        assert_eq!(result.unwrap_err(), Error::CookieMissing);
    }

    #[test]
    fn expired_cookie_is_rejected() {
        let jar = set_auth_cookie(test_jar(), UserID::new(7), Duration::hours(-1));

        let result = get_token_from_cookies(&jar);

        assert_eq!(result.unwrap_err(), Error::InvalidCredentials);
    }

    #[test]
    fn invalidated_cookie_is_missing() {
        let jar = set_auth_cookie(test_jar(), UserID::new(7), Duration::hours(1));

        let jar = invalidate_auth_cookie(jar);

        assert_eq!(
            get_token_from_cookies(&jar).unwrap_err(),
            Error::CookieMissing
        );
    }
}
