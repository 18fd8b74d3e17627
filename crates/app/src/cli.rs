//! CLI command definitions and dispatch.

use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use friendlines_application::{
    ApplicationError, FetchCurrentUser, Login, Logout, Register, RestoreSession,
};
use friendlines_domain::{AuthError, LoginCredentials, RegisterCredentials};
use friendlines_infrastructure::ClientConfig;

use crate::context::AppContext;
use crate::social::{self, DeviceCommand, FriendsCommand, GroupsCommand, PageArgs, UsersCommand};

/// Friendlines command-line client
#[derive(Debug, Parser)]
#[command(name = "friendlines", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account username
        username: String,
        /// Account password
        #[arg(long, env = "FRIENDLINES_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Account username
        #[arg(long)]
        username: String,
        /// Display name
        #[arg(long)]
        full_name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "FRIENDLINES_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Exchange the session cookie for a new access token
    Refresh,
    /// Print a freshly validated access token
    Token,
    /// Fetch and print the signed-in user's profile
    Whoami,
    /// Show the stored session without contacting the server
    Status,
    /// Send an authenticated GET request and print the response data
    Get {
        /// API path, relative to the base URL (e.g. `/friendships/list`)
        path: String,
    },
    /// Show your newsflash feed
    Feed(PageArgs),
    /// Post a newsflash to your friends or to a group
    Post {
        /// Newsflash text
        content: String,
        /// Post to this group instead of to friends
        #[arg(long)]
        group: Option<String>,
    },
    /// Friends and friend requests
    #[command(subcommand)]
    Friends(FriendsCommand),
    /// Groups
    #[command(subcommand)]
    Groups(GroupsCommand),
    /// User search and profiles
    #[command(subcommand)]
    Users(UsersCommand),
    /// Push notification devices
    #[command(subcommand)]
    Device(DeviceCommand),
}

impl Cli {
    /// Loads configuration and executes the command.
    ///
    /// # Errors
    ///
    /// Returns the configuration or command error.
    pub async fn execute(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let config = ClientConfig::load(self.config.as_deref())?;
        self.command.run(&config, out).await
    }
}

impl Commands {
    /// Executes the command against `config`, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(&self, config: &ClientConfig, out: &mut impl Write) -> anyhow::Result<()> {
        let ctx = AppContext::new(config).await?;
        let result = self.dispatch(&ctx, out).await;
        if !matches!(self, Self::Logout) {
            ctx.persist_cookies().await;
        }
        result
    }

    async fn dispatch(&self, ctx: &AppContext, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Self::Login { username, password } => {
                let password = require_password(password.as_deref())?;
                let credentials = LoginCredentials::new(username, password)?;
                let session = Login::new(ctx.coordinator()).execute(&credentials).await?;
                writeln!(
                    out,
                    "Logged in as {} (@{})",
                    session.user.display_name(),
                    session.user.username
                )?;
            }
            Self::Register {
                username,
                full_name,
                email,
                password,
            } => {
                let credentials = RegisterCredentials::new(
                    username,
                    full_name,
                    email,
                    require_password(password.as_deref())?,
                )?;
                let session = Register::new(ctx.coordinator()).execute(&credentials).await?;
                writeln!(out, "Registered and logged in as @{}", session.user.username)?;
            }
            Self::Logout => {
                let output = Logout::new(ctx.coordinator()).execute().await?;
                ctx.forget_cookies().await;
                if output.server_acknowledged {
                    writeln!(out, "Logged out")?;
                } else {
                    writeln!(out, "Logged out locally (server could not be reached)")?;
                }
            }
            Self::Refresh => {
                let token = ctx
                    .coordinator()
                    .refresh_access_token()
                    .await
                    .map_err(ApplicationError::from)?;
                writeln!(out, "Token refreshed: {}", token.preview())?;
            }
            Self::Token => {
                let Some(token) = ctx.coordinator().valid_token().await else {
                    bail!(AuthError::NotAuthenticated);
                };
                writeln!(out, "{}", token.as_str())?;
            }
            Self::Whoami => {
                let user = FetchCurrentUser::new(ctx.coordinator()).execute().await?;
                writeln!(out, "{}", serde_json::to_string_pretty(&user)?)?;
            }
            Self::Status => match RestoreSession::new(ctx.coordinator()).execute().await? {
                Some(session) => writeln!(
                    out,
                    "Signed in as {} (@{}), token {}",
                    session.user.display_name(),
                    session.user.username,
                    session.access_token.preview()
                )?,
                None => writeln!(out, "Not signed in")?,
            },
            Self::Get { path } => {
                let data: serde_json::Value = ctx.authorized_client().get_json(path).await?;
                writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
            }
            Self::Feed(paging) => social::feed(&ctx.authorized_client(), *paging, out).await?,
            Self::Post { content, group } => {
                social::post(&ctx.authorized_client(), content, group.as_deref(), out).await?;
            }
            Self::Friends(command) => command.run(&ctx.authorized_client(), out).await?,
            Self::Groups(command) => command.run(&ctx.authorized_client(), out).await?,
            Self::Users(command) => command.run(&ctx.authorized_client(), out).await?,
            Self::Device(command) => command.run(&ctx.authorized_client(), out).await?,
        }
        Ok(())
    }
}

fn require_password(password: Option<&str>) -> anyhow::Result<String> {
    match password {
        Some(password) if !password.is_empty() => Ok(password.to_string()),
        _ => bail!("a password is required (pass --password or set FRIENDLINES_PASSWORD)"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let cli =
            Cli::try_parse_from(["friendlines", "login", "jdoe", "--password", "pw"]).unwrap();
        match cli.command {
            Commands::Login { username, password } => {
                assert_eq!(username, "jdoe");
                assert_eq!(password.as_deref(), Some("pw"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_and_config() {
        let cli = Cli::try_parse_from([
            "friendlines",
            "--config",
            "custom.toml",
            "register",
            "--username",
            "jdoe",
            "--full-name",
            "Jane Doe",
            "--email",
            "jane@example.com",
            "--password",
            "pw",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Register { .. }));
    }

    #[test]
    fn test_require_password() {
        assert_eq!(require_password(Some("pw")).unwrap(), "pw");
        assert!(require_password(Some("")).is_err());
        assert!(require_password(None).is_err());
    }

    #[test]
    fn test_parse_social_commands() {
        let cli = Cli::try_parse_from(["friendlines", "feed", "--page", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Feed(PageArgs { page: 2, limit: 20 })
        ));

        let cli = Cli::try_parse_from(["friendlines", "post", "hi", "--group", "g-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Post { group: Some(_), .. }));

        let cli = Cli::try_parse_from(["friendlines", "groups", "invite", "g-1", "u-7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Groups(GroupsCommand::Invite { .. })
        ));

        let cli = Cli::try_parse_from([
            "friendlines",
            "device",
            "register",
            "tok",
            "--platform",
            "ios",
        ])
        .unwrap();
        match cli.command {
            Commands::Device(DeviceCommand::Register { platform, .. }) => {
                assert_eq!(platform, friendlines_domain::DevicePlatform::Ios);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let unknown_platform = [
            "friendlines",
            "device",
            "register",
            "tok",
            "--platform",
            "palm",
        ];
        assert!(Cli::try_parse_from(unknown_platform).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
