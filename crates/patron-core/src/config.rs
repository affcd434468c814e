// ── Upstream endpoint configuration ──
//
// URI templates for every upstream endpoint the account layer knows about.
// Built once by `patron-config` from the `api.path` table and handed to
// each service; core never reads settings files.

/// Named upstream URI templates.
///
/// Templates may contain positional placeholders such as `{id}`, filled by
/// [`patron_api::replace_placeholders`]. Nothing here is validated; a
/// malformed template surfaces when a request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfiguration {
    login_uri: String,
    user_uri: String,
    password_update_uri: String,
    pin_update_uri: String,
    loan_current_uri: String,
    loan_history_uri: String,
    reserve_current_uri: String,
    reserve_history_uri: String,
}

impl ApiConfiguration {
    pub fn login_uri(&self) -> &str {
        &self.login_uri
    }

    pub fn set_login_uri(&mut self, uri: impl Into<String>) {
        self.login_uri = uri.into();
    }

    pub fn user_uri(&self) -> &str {
        &self.user_uri
    }

    pub fn set_user_uri(&mut self, uri: impl Into<String>) {
        self.user_uri = uri.into();
    }

    pub fn password_update_uri(&self) -> &str {
        &self.password_update_uri
    }

    pub fn set_password_update_uri(&mut self, uri: impl Into<String>) {
        self.password_update_uri = uri.into();
    }

    pub fn pin_update_uri(&self) -> &str {
        &self.pin_update_uri
    }

    pub fn set_pin_update_uri(&mut self, uri: impl Into<String>) {
        self.pin_update_uri = uri.into();
    }

    pub fn loan_current_uri(&self) -> &str {
        &self.loan_current_uri
    }

    pub fn set_loan_current_uri(&mut self, uri: impl Into<String>) {
        self.loan_current_uri = uri.into();
    }

    pub fn loan_history_uri(&self) -> &str {
        &self.loan_history_uri
    }

    pub fn set_loan_history_uri(&mut self, uri: impl Into<String>) {
        self.loan_history_uri = uri.into();
    }

    pub fn reserve_current_uri(&self) -> &str {
        &self.reserve_current_uri
    }

    pub fn set_reserve_current_uri(&mut self, uri: impl Into<String>) {
        self.reserve_current_uri = uri.into();
    }

    pub fn reserve_history_uri(&self) -> &str {
        &self.reserve_history_uri
    }

    pub fn set_reserve_history_uri(&mut self, uri: impl Into<String>) {
        self.reserve_history_uri = uri.into();
    }

    /// All templates keyed by their settings name, in settings order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("login", self.login_uri.as_str()),
            ("user", self.user_uri.as_str()),
            ("passwordUpdate", self.password_update_uri.as_str()),
            ("pinUpdate", self.pin_update_uri.as_str()),
            ("loanCurrent", self.loan_current_uri.as_str()),
            ("loanHistory", self.loan_history_uri.as_str()),
            ("reserveCurrent", self.reserve_current_uri.as_str()),
            ("reserveHistory", self.reserve_history_uri.as_str()),
        ]
    }
}
