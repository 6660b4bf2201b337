use std::fmt;

use tracing::info;

/// Logical screen paths. Everything except login is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Upload,
    Matches,
    Rejections,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
            Route::Upload => "/upload",
            Route::Matches => "/matches",
            Route::Rejections => "/rejections",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Login),
            "/dashboard" => Some(Route::Dashboard),
            "/upload" => Some(Route::Upload),
            "/matches" => Some(Route::Matches),
            "/rejections" => Some(Route::Rejections),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Phone number with fewer than 10 digits
    InvalidPhone,
    /// Empty OTP code
    EmptyOtp,
    /// verify_otp called without a pending OTP
    NotAwaitingOtp,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidPhone => write!(f, "Please enter a valid phone number"),
            SessionError::EmptyOtp => write!(f, "Please enter OTP"),
            SessionError::NotAwaitingOtp => write!(f, "No OTP was requested"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Explicit session state machine replacing an ambient logged-in flag.
///
/// The OTP step performs no real verification: any non-empty code is
/// accepted. `AwaitingOtp` exists so that verification without a prior
/// request is rejectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    AwaitingOtp { phone: String },
    Authenticated { phone: String },
}

impl Session {
    pub fn new() -> Self {
        Session::Anonymous
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Request an OTP for the given phone number. At least 10 digits are
    /// required; formatting characters are ignored.
    pub fn request_otp(&mut self, phone: &str) -> Result<(), SessionError> {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 10 {
            return Err(SessionError::InvalidPhone);
        }
        *self = Session::AwaitingOtp { phone: phone.to_string() };
        Ok(())
    }

    /// Verify the OTP. Mock check: any non-empty code passes.
    pub fn verify_otp(&mut self, code: &str) -> Result<(), SessionError> {
        match self {
            Session::AwaitingOtp { phone } => {
                if code.trim().is_empty() {
                    return Err(SessionError::EmptyOtp);
                }
                let phone = phone.clone();
                info!("Session: authenticated {}", phone);
                *self = Session::Authenticated { phone };
                Ok(())
            }
            _ => Err(SessionError::NotAwaitingOtp),
        }
    }

    pub fn log_out(&mut self) {
        *self = Session::Anonymous;
    }

    /// Apply the gating rules to a requested route: gated routes redirect
    /// to login while unauthenticated, and the login route forwards to the
    /// upload screen once authenticated.
    pub fn resolve(&self, requested: Route) -> Route {
        match (requested, self.is_authenticated()) {
            (Route::Login, true) => Route::Upload,
            (route, true) => route,
            (_, false) => Route::Login,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> Session {
        let mut session = Session::new();
        session.request_otp("+1 (555) 010-4477").expect("valid phone");
        session.verify_otp("123456").expect("non-empty code");
        session
    }

    #[test]
    fn gated_routes_redirect_to_login_while_anonymous() {
        let session = Session::new();
        for route in [Route::Dashboard, Route::Upload, Route::Matches, Route::Rejections] {
            assert_eq!(session.resolve(route), Route::Login);
        }
        assert_eq!(session.resolve(Route::Login), Route::Login);
    }

    #[test]
    fn authenticated_sessions_reach_gated_routes() {
        let session = authenticated();
        assert_eq!(session.resolve(Route::Matches), Route::Matches);
        // revisiting login forwards to the upload screen
        assert_eq!(session.resolve(Route::Login), Route::Upload);
    }

    #[test]
    fn short_phone_numbers_are_rejected() {
        let mut session = Session::new();
        assert_eq!(session.request_otp("555-0104"), Err(SessionError::InvalidPhone));
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn any_non_empty_otp_is_accepted() {
        let mut session = Session::new();
        session.request_otp("5550104477").expect("valid phone");
        assert!(session.verify_otp("x").is_ok());
        assert!(session.is_authenticated());
    }

    #[test]
    fn empty_otp_is_rejected_and_state_kept() {
        let mut session = Session::new();
        session.request_otp("5550104477").expect("valid phone");
        assert_eq!(session.verify_otp("  "), Err(SessionError::EmptyOtp));
        assert!(matches!(session, Session::AwaitingOtp { .. }));
    }

    #[test]
    fn verification_without_request_fails() {
        let mut session = Session::new();
        assert_eq!(session.verify_otp("123456"), Err(SessionError::NotAwaitingOtp));
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let mut session = authenticated();
        session.log_out();
        assert_eq!(session.resolve(Route::Dashboard), Route::Login);
    }

    #[test]
    fn paths_round_trip() {
        for route in [Route::Login, Route::Dashboard, Route::Upload, Route::Matches, Route::Rejections] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/admin"), None);
    }
}
