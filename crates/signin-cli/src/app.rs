//! Terminal frontend state: configuration, the token store, and the
//! interactive login loop driving `LoginScreen`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use signin_core::config::TokenStoreKind;
use signin_core::{
    session, ApiClient, Config, FileStore, KeyValueStore, KeyringStore, LoginError, LoginScreen,
    MemoryStore, Navigator, Node, Route, RouteParams, TestId,
};
use tracing::{debug, info, warn};

/// Attempts before the interactive login gives up
const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Sub-directory of the data directory holding persisted values
const STORE_DIR: &str = "store";

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Login,
    Status,
    Logout,
    Help,
}

impl Command {
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args.get(1).map(String::as_str) {
            None => Ok(Command::Login),
            Some("--status") => Ok(Command::Status),
            Some("--logout") => Ok(Command::Logout),
            Some("--help") | Some("-h") => Ok(Command::Help),
            Some(other) => Err(anyhow::anyhow!("Unknown argument: {}", other)),
        }
    }
}

/// Navigator that reports route changes on the terminal
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Option<Route>,
}

impl TerminalNavigator {
    pub fn current(&self) -> Option<Route> {
        self.current
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, route: Route, params: RouteParams) {
        debug!(%route, params = params.len(), "Navigating");
        self.current = Some(route);
    }
}

pub struct App {
    pub config: Config,
    store: Box<dyn KeyValueStore>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = open_store(&config)?;
        Ok(Self { config, store })
    }

    pub fn status(&self) -> Result<()> {
        match session::initial_route(&self.store).context("Failed to read stored token")? {
            Route::Home => println!("Signed in."),
            Route::Login => println!("Not signed in."),
        }
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        session::sign_out(&self.store).context("Failed to remove stored token")?;
        println!("Signed out.");
        Ok(())
    }

    /// Interactive login. Skips the prompt when a token is already stored.
    pub async fn login(self) -> Result<()> {
        if session::initial_route(&self.store).context("Failed to read stored token")?
            == Route::Home
        {
            info!("Existing session found");
            println!("Already signed in. Use --logout to sign out.");
            return Ok(());
        }

        let App { mut config, store } = self;

        let api = ApiClient::new(&config).context("Failed to create API client")?;
        let default_email = config.last_email.clone().unwrap_or_default();
        let mut screen =
            LoginScreen::new(api, store, TerminalNavigator::default()).with_email(default_email);

        println!("\n=== Sign in ===\n");

        match run_login(&mut screen, &mut TerminalPrompt).await? {
            LoginOutcome::SignedIn => {}
            LoginOutcome::Cancelled => {
                println!("Sign in cancelled.");
                return Ok(());
            }
            LoginOutcome::Exhausted => {
                return Err(anyhow::anyhow!(
                    "Sign in failed after {} attempts",
                    MAX_LOGIN_ATTEMPTS
                ));
            }
        }

        config.last_email = Some(screen.email().to_string());
        if let Err(e) = config.save() {
            warn!(error = %e, "Failed to save config");
        }

        if screen.navigator().current() == Some(Route::Home) {
            println!("Signed in as {}.", screen.email());
        }
        Ok(())
    }
}

/// Where the interactive login reads its input from
pub trait CredentialSource {
    /// Next email to try, with `default` used for blank input.
    /// `None` ends the login.
    fn email(&mut self, default: &str) -> Result<Option<String>>;

    fn password(&mut self) -> Result<String>;
}

/// Reads the email from stdin and the password without echo
pub struct TerminalPrompt;

impl CredentialSource for TerminalPrompt {
    fn email(&mut self, default: &str) -> Result<Option<String>> {
        if default.is_empty() {
            print!("Email: ");
        } else {
            print!("Email [{}]: ", default);
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // End of input
            return Ok(None);
        }
        Ok(resolve_email(&input, default))
    }

    fn password(&mut self) -> Result<String> {
        Ok(rpassword::prompt_password("Password: ")?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn,
    /// Input ended or the email was left empty
    Cancelled,
    /// Every attempt failed
    Exhausted,
}

/// Prompt and submit until sign-in succeeds, the input runs out, or
/// `MAX_LOGIN_ATTEMPTS` submissions have failed.
pub async fn run_login<S, N, C>(
    screen: &mut LoginScreen<S, N>,
    source: &mut C,
) -> Result<LoginOutcome>
where
    S: KeyValueStore,
    N: Navigator,
    C: CredentialSource,
{
    let mut attempt = 0;
    while attempt < MAX_LOGIN_ATTEMPTS {
        let Some(email) = source.email(screen.email())? else {
            return Ok(LoginOutcome::Cancelled);
        };
        let password = source.password()?;

        if let Err(e) = fill_form(screen, &email, &password) {
            println!("{}", e);
            continue;
        }

        attempt += 1;
        println!("\nSigning in...");
        match screen.press(TestId::SubmitButton).await {
            Ok(()) => return Ok(LoginOutcome::SignedIn),
            Err(e) => {
                warn!(attempt, error = %e, "Sign-in attempt failed");
                if let Some(Node::ErrorText { message }) = screen.query(TestId::SignInError) {
                    println!("{}\n", message);
                }
            }
        }
    }

    Ok(LoginOutcome::Exhausted)
}

fn fill_form<S: KeyValueStore, N: Navigator>(
    screen: &mut LoginScreen<S, N>,
    email: &str,
    password: &str,
) -> Result<(), LoginError> {
    screen.change_text(TestId::EmailInput, email)?;
    screen.change_text(TestId::PasswordInput, password)?;
    Ok(())
}

/// Pick the store the token lives in
fn open_store(config: &Config) -> Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.token_store {
        TokenStoreKind::File => {
            let dir = config.data_dir()?.join(STORE_DIR);
            Box::new(FileStore::new(dir).context("Failed to open token store")?)
        }
        TokenStoreKind::Keyring => Box::new(KeyringStore::default()),
        TokenStoreKind::Memory => Box::new(MemoryStore::new()),
    };
    debug!(kind = ?config.token_store, "Token store opened");
    Ok(store)
}

/// Typed input wins; blank input keeps the default. `None` when both are empty.
pub fn resolve_email(input: &str, default: &str) -> Option<String> {
    let input = input.trim();
    let email = if input.is_empty() { default } else { input };
    if email.is_empty() {
        None
    } else {
        Some(email.to_string())
    }
}

pub fn print_usage() {
    println!("Usage: signin [--status | --logout | --help]");
    println!();
    println!("  (no args)   Sign in and store the session token");
    println!("  --status    Show whether a session token is stored");
    println!("  --logout    Remove the stored session token");
}
