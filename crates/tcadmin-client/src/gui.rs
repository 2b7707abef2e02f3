//! Links into the TCAdmin web GUI
//!
//! Pure string composition over the configured GUI root; nothing here
//! touches the network.

use url::form_urlencoded;

/// Login page
pub const PATH_LOGIN: &str = "login.aspx";
/// User main menu
pub const PATH_USER_HOME: &str = "user_home.aspx";
/// Game service list
pub const PATH_SERVICES: &str = "services.aspx";
/// Single game service
pub const PATH_SERVICE_HOME: &str = "service_home.aspx";
/// Voice server list
pub const PATH_VOICE_SERVERS: &str = "voiceservers.aspx";
/// Single voice service
pub const PATH_VOICE_SERVICE_HOME: &str = "vvoiceserver_home.aspx";

/// Game service id
pub const GET_SERVICE_ID: &str = "serviceid";
/// Short service description
pub const GET_SERVICE_DESC_SHORT: &str = "svc_short_desc";
/// Page to return to
pub const GET_RETURN_TO: &str = "returnto";
/// Master voice server id
pub const GET_MVSID: &str = "mvsid";
/// Virtual voice server id
pub const GET_VVSID: &str = "vvsid";
/// Voice server type
pub const GET_VOICE_TYPE: &str = "voicetype";

/// URL builder for GUI pages.
///
/// Paths are appended to the root verbatim, so the root should end with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuiUrls {
    root: Option<String>,
}

impl GuiUrls {
    /// Create a builder for the given GUI root
    pub fn new(root: Option<String>) -> Self {
        Self { root }
    }

    /// Get the GUI root
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Login page
    pub fn login(&self) -> String {
        self.page(PATH_LOGIN, &[])
    }

    /// User main menu
    pub fn user_home(&self) -> String {
        self.page(PATH_USER_HOME, &[])
    }

    /// Game service list
    pub fn services(&self) -> String {
        self.page(PATH_SERVICES, &[])
    }

    /// Voice server list
    pub fn voice_servers(&self) -> String {
        self.page(PATH_VOICE_SERVERS, &[])
    }

    /// Game service page, e.g. `service(&[(GET_SERVICE_ID, "12")])`
    pub fn service(&self, args: &[(&str, &str)]) -> String {
        self.page(PATH_SERVICE_HOME, args)
    }

    /// Voice service page
    pub fn service_voice(&self, args: &[(&str, &str)]) -> String {
        self.page(PATH_VOICE_SERVICE_HOME, args)
    }

    /// Root + `path`, with `args` form-encoded as a query string when non-empty
    pub fn page(&self, path: &str, args: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.root.as_deref().unwrap_or_default(), path);
        if !args.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(args)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}
