//! Legacy GUI login through a scripted browser
//!
//! TCAdmin has no API call that hands out a GUI session, so single sign-on
//! is done by submitting the login form with a scripted browser and reading
//! the session cookie it ends up with. The browser itself (HTTP, cookies,
//! form handling) is an external capability behind [`ScriptedBrowser`].

use crate::error::TcAdminError;
use crate::gui::GuiUrls;
use tracing::{debug, info};

const FORM_USERNAME: &str = "UserName";
const FORM_PASSWORD: &str = "Password";
const FORM_SUBMIT: &str = "ButtonLogin";

/// Title fragment of the page shown after a successful login
const LOGGED_IN_TITLE: &str = "user main menu";

/// A cookie-keeping, form-submitting web client
#[async_trait::async_trait]
pub trait ScriptedBrowser: Send {
    /// Add a raw header (`Name: value`) to every following request
    fn add_header(&mut self, header: &str);

    /// Load a page
    async fn get(&mut self, url: &str) -> Result<(), TcAdminError>;

    /// Fill a form field on the current page
    fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), TcAdminError>;

    /// Submit the current form with the named submit button
    async fn click_submit_by_name(&mut self, name: &str) -> Result<(), TcAdminError>;

    /// Title of the current page
    fn title(&self) -> Option<String>;

    /// Value of a cookie held by the browser
    fn cookie_value(&self, name: &str) -> Option<String>;
}

/// Credentials and browser identity for a GUI login
#[derive(Clone)]
pub struct LoginRequest {
    /// GUI login name
    pub username: String,
    /// GUI password
    pub password: String,
    /// Forwarded so the session is bound to the end user's browser
    pub user_agent: String,
    /// Name of the session cookie TCAdmin sets
    pub cookie_name: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

/// Session cookie obtained from a GUI login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

/// Drive `browser` through the GUI login form.
///
/// Returns `Ok(None)` when the credentials were not accepted.
pub async fn login<B>(
    gui: &GuiUrls,
    browser: &mut B,
    request: &LoginRequest,
) -> Result<Option<SessionCookie>, TcAdminError>
where
    B: ScriptedBrowser + ?Sized,
{
    if gui.root().is_none() {
        return Err(TcAdminError::Configuration("GUI root URL is not set".to_string()));
    }

    let url = gui.login();
    debug!("Logging {} into {}", request.username, url);

    browser.add_header(&format!("User-Agent: {}", request.user_agent));
    browser.get(&url).await?;
    browser.set_field_by_name(FORM_USERNAME, &request.username)?;
    browser.set_field_by_name(FORM_PASSWORD, &request.password)?;
    browser.click_submit_by_name(FORM_SUBMIT).await?;

    let logged_in = browser
        .title()
        .is_some_and(|t| t.to_lowercase().contains(LOGGED_IN_TITLE));
    if !logged_in {
        info!("GUI login rejected for {}", request.username);
        return Ok(None);
    }

    let value = browser.cookie_value(&request.cookie_name).ok_or_else(|| {
        TcAdminError::Login(format!("logged in but cookie {} was not set", request.cookie_name))
    })?;

    Ok(Some(SessionCookie {
        name: request.cookie_name.clone(),
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BrowserAction, MockBrowser};

    fn gui() -> GuiUrls {
        GuiUrls::new(Some("https://panel.example.com/".to_string()))
    }

    fn request() -> LoginRequest {
        LoginRequest {
            username: "player".to_string(),
            password: "pw".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            cookie_name: "TCADMIN_SESSION".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_login_returns_cookie() {
        let mut browser = MockBrowser::new()
            .with_title_after_submit("TCAdmin - User Main Menu")
            .with_cookie("TCADMIN_SESSION", "abc123");

        let cookie = login(&gui(), &mut browser, &request()).await.unwrap();
        assert_eq!(
            cookie,
            Some(SessionCookie { name: "TCADMIN_SESSION".to_string(), value: "abc123".to_string() })
        );
        assert_eq!(
            browser.actions(),
            [
                BrowserAction::Header("User-Agent: Mozilla/5.0".to_string()),
                BrowserAction::Get("https://panel.example.com/login.aspx".to_string()),
                BrowserAction::SetField("UserName".to_string(), "player".to_string()),
                BrowserAction::SetField("Password".to_string(), "pw".to_string()),
                BrowserAction::Submit("ButtonLogin".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn title_match_is_case_insensitive() {
        let mut browser = MockBrowser::new()
            .with_title_after_submit("USER MAIN MENU")
            .with_cookie("TCADMIN_SESSION", "x");
        assert!(login(&gui(), &mut browser, &request()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejected_login_returns_none() {
        let mut browser = MockBrowser::new().with_title_after_submit("Login");
        assert_eq!(login(&gui(), &mut browser, &request()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_cookie_is_an_error() {
        let mut browser = MockBrowser::new().with_title_after_submit("User Main Menu");
        let err = login(&gui(), &mut browser, &request()).await.unwrap_err();
        assert!(matches!(err, TcAdminError::Login(_)));
    }

    #[tokio::test]
    async fn login_requires_gui_root() {
        let mut browser = MockBrowser::new();
        let err = login(&GuiUrls::default(), &mut browser, &request()).await.unwrap_err();
        assert!(matches!(err, TcAdminError::Configuration(_)));
        assert!(browser.actions().is_empty());
    }
}
