//! TCAdmin request and bookkeeping models
//!
//! Field names and function names match the TCAdmin billing API
//! (`billingapi.aspx`), which takes every argument as a form field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Authentication username field
pub const FIELD_USERNAME: &str = "tcadmin_username";
/// Authentication password field
pub const FIELD_PASSWORD: &str = "tcadmin_password";
/// Remote function selector
pub const FIELD_FUNCTION: &str = "function";
/// Response format selector
pub const FIELD_RESPONSE_TYPE: &str = "response_type";

/// Billing package id shared by game and voice services
pub const FIELD_CLIENT_PACKAGE_ID: &str = "client_package_id";
/// Billing client id
pub const FIELD_CLIENT_ID: &str = "client_id";
/// Skip the setup page when provisioning
pub const FIELD_SKIP_PAGE: &str = "skip_page";

/// Email of the TCAdmin user owning a new service
pub const FIELD_USER_EMAIL: &str = "user_email";
/// Login name of the TCAdmin user
pub const FIELD_USER_NAME: &str = "user_name";
/// First name of the TCAdmin user
pub const FIELD_USER_FNAME: &str = "user_fname";
/// Last name of the TCAdmin user
pub const FIELD_USER_LNAME: &str = "user_lname";
/// Password of the TCAdmin user
pub const FIELD_USER_PASSWORD: &str = "user_password";

/// Remote functions exposed by the billing API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteFunction {
    /// List supported games
    GetSupportedGames,
    /// List supported voice servers
    GetSupportedVoiceServers,
    /// Queue a new service for setup
    AddPendingSetup,
    /// Suspend the services of a billing package
    SuspendGameAndVoiceByBillingId,
    /// Unsuspend the services of a billing package
    UnSuspendGameAndVoiceByBillingId,
    /// Delete the services of a billing package
    DeleteGameAndVoiceByBillingId,
    /// Change settings of a billing package
    UpdateSettings,
}

impl RemoteFunction {
    /// Wire name sent in the `function` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetSupportedGames => "GetSupportedGames",
            Self::GetSupportedVoiceServers => "GetSupportedVoiceServers",
            Self::AddPendingSetup => "AddPendingSetup",
            Self::SuspendGameAndVoiceByBillingId => "SuspendGameAndVoiceByBillingID",
            Self::UnSuspendGameAndVoiceByBillingId => "UnSuspendGameAndVoiceByBillingID",
            Self::DeleteGameAndVoiceByBillingId => "DeleteGameAndVoiceByBillingID",
            Self::UpdateSettings => "UpdateSettings",
        }
    }
}

impl fmt::Display for RemoteFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response format requested from the server.
///
/// Only XML is parsed by this client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// XML documents
    #[default]
    Xml,
}

impl ResponseFormat {
    /// Wire value sent in the `response_type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
        }
    }
}

/// Status of a pending setup as reported by TCAdmin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupStatus {
    /// Waiting to be provisioned
    Pending,
    /// Provisioned
    Complete,
    /// Provisioning failed
    Errored,
}

impl SetupStatus {
    /// Numeric status code used by TCAdmin
    pub fn code(&self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Complete => 2,
            Self::Errored => 3,
        }
    }

    /// Status for a numeric code, `None` if unknown
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Pending),
            2 => Some(Self::Complete),
            3 => Some(Self::Errored),
            _ => None,
        }
    }
}

/// Form fields for a single remote call.
///
/// Keys are unique: inserting an existing key replaces its value, so the
/// encoded body never carries the same field twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParameters {
    fields: BTreeMap<String, String>,
}

impl RequestParameters {
    /// Empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters with only the `function` field set
    pub fn for_function(function: RemoteFunction) -> Self {
        let mut params = Self::new();
        params.set_function(function);
        params
    }

    /// Set a field, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the `function` field
    pub fn set_function(&mut self, function: RemoteFunction) {
        self.insert(FIELD_FUNCTION, function.as_str());
    }

    /// Value of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// True if the field is set
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RequestParameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Fields for `AddPendingSetup`.
///
/// Typed setters cover the fields TCAdmin documents for new users and
/// billing ids; anything else (game id, slots, hostname, ...) goes through
/// [`field`](Self::field).
#[derive(Debug, Clone, Default)]
pub struct ServiceSetup {
    params: RequestParameters,
}

impl ServiceSetup {
    /// Empty setup
    pub fn new() -> Self {
        Self::default()
    }

    /// Billing client id
    pub fn client_id(self, id: impl Into<String>) -> Self {
        self.field(FIELD_CLIENT_ID, id)
    }

    /// Billing package id
    pub fn client_package_id(self, id: impl Into<String>) -> Self {
        self.field(FIELD_CLIENT_PACKAGE_ID, id)
    }

    /// Skip the setup page
    pub fn skip_page(self, skip: bool) -> Self {
        self.field(FIELD_SKIP_PAGE, if skip { "1" } else { "0" })
    }

    /// Owner email
    pub fn user_email(self, email: impl Into<String>) -> Self {
        self.field(FIELD_USER_EMAIL, email)
    }

    /// Owner login name
    pub fn user_name(self, name: impl Into<String>) -> Self {
        self.field(FIELD_USER_NAME, name)
    }

    /// Owner first name
    pub fn user_first_name(self, name: impl Into<String>) -> Self {
        self.field(FIELD_USER_FNAME, name)
    }

    /// Owner last name
    pub fn user_last_name(self, name: impl Into<String>) -> Self {
        self.field(FIELD_USER_LNAME, name)
    }

    /// Owner password
    pub fn user_password(self, password: impl Into<String>) -> Self {
        self.field(FIELD_USER_PASSWORD, password)
    }

    /// Set an arbitrary setup field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Form fields for the setup
    pub fn into_parameters(self) -> RequestParameters {
        self.params
    }
}

impl From<ServiceSetup> for RequestParameters {
    fn from(setup: ServiceSetup) -> Self {
        setup.into_parameters()
    }
}

/// Last remote error seen by a client.
///
/// `code == 0` means no error has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastError {
    /// Normalized remote error code
    pub code: i64,
    /// `errortext` of the failed call
    pub message: String,
}

impl LastError {
    /// True if no error has been recorded
    pub fn is_none(&self) -> bool {
        self.code == 0
    }
}
