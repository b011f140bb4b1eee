//! Subcommand dispatch.

use std::sync::Arc;

use chessearn_shared::time::SystemClock;

use crate::{
    config::ClientConfig,
    domain::{GameId, HttpTransport, UserId, UserProfile},
    error::ClientError,
    infrastructure::{
        dto::http::{CreateGameRequest, SignupRequest},
        http::ReqwestTransport,
        realtime::SocketIoConnector,
        store::FileCredentialStore,
    },
    usecase::{
        AuthUseCase, AuthenticatedClient, ConnectionManager, GameUseCase, HistoryQuery,
        OpenGamesPoller, ProfileUseCase, Session, SharedSession,
    },
};

use super::{
    command::Command,
    formatter::Formatter,
    play::{SessionMode, run_game},
    prompt::ask,
};

/// Everything a command needs, wired once per process.
pub struct App {
    pub config: ClientConfig,
    pub session: SharedSession,
    pub auth: AuthUseCase,
    pub profile: ProfileUseCase,
    pub games: Arc<GameUseCase>,
}

impl App {
    /// Wire the production stack: credential file, reqwest, Socket.IO.
    pub async fn bootstrap(config: ClientConfig) -> Result<Self, ClientError> {
        let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));
        let session = Session::hydrate(store).await?.into_shared();
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(config.api_base_url.clone()));
        Ok(Self::with_parts(config, session, transport))
    }

    pub fn with_parts(
        config: ClientConfig,
        session: SharedSession,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let client = AuthenticatedClient::new(transport, session.clone());
        Self {
            auth: AuthUseCase::new(client.clone()),
            profile: ProfileUseCase::new(client.clone(), config.api_base_url.clone()),
            games: Arc::new(GameUseCase::new(client)),
            config,
            session,
        }
    }

    pub fn connection_manager(&self) -> ConnectionManager {
        ConnectionManager::new(
            Arc::new(SocketIoConnector::new(self.config.realtime_url.clone())),
            self.session.clone(),
            Arc::new(SystemClock),
        )
    }

    /// The logged-in user, restoring the session if needed.
    pub async fn require_login(&self) -> Result<UserProfile, ClientError> {
        self.auth
            .restore()
            .await?
            .ok_or(ClientError::NotAuthenticated)
    }
}

fn parse_game_id(raw: &str) -> Result<GameId, ClientError> {
    GameId::new(raw).map_err(|e| ClientError::InvalidInput(e.to_string()))
}

async fn password_or_prompt(password: Option<String>) -> Result<String, ClientError> {
    match password {
        Some(password) => Ok(password),
        None => ask("Password: ").await,
    }
}

/// Run one subcommand to completion.
pub async fn run(app: &App, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Signup {
            first_name,
            last_name,
            email,
            username,
            phone_number,
            password,
        } => {
            let password = password_or_prompt(password).await?;
            let message = app
                .auth
                .signup(SignupRequest {
                    first_name,
                    last_name,
                    email,
                    username,
                    phone_number,
                    password,
                })
                .await?;
            println!("{}", message);
        }

        Command::Login {
            identifier,
            password,
        } => {
            let password = password_or_prompt(password).await?;
            let user = app.auth.login(&identifier, &password).await?;
            println!("Logged in as {}", user.username);
        }

        Command::Logout => {
            app.auth.logout().await?;
            println!("Logged out");
        }

        Command::Profile => {
            app.require_login().await?;
            let user = app.profile.get_profile().await?;
            let photo_url = app.profile.photo_url(user.photo_filename.as_deref());
            print!("{}", Formatter::profile(&user, &photo_url));
        }

        Command::Create {
            base_time,
            increment,
            unrated,
            bet,
            play,
        } => {
            app.require_login().await?;
            let game = app
                .games
                .create(CreateGameRequest {
                    is_rated: !unrated,
                    base_time,
                    increment,
                    opponent_id: None,
                    bet_amount: bet,
                })
                .await?;
            print!("{}", Formatter::game_summary(&game));
            if play {
                run_game(app, game.id, SessionMode::Play).await?;
            }
        }

        Command::Join { game_id, play } => {
            app.require_login().await?;
            let game = app.games.join(&parse_game_id(&game_id)?).await?;
            print!("{}", Formatter::game_summary(&game));
            if play {
                run_game(app, game.id, SessionMode::Play).await?;
            }
        }

        Command::Open { follow } => {
            app.require_login().await?;
            if follow {
                follow_open_games(app).await?;
            } else {
                let games = app.games.open_games().await?;
                print!("{}", Formatter::open_games(&games));
            }
        }

        Command::History {
            page,
            per_page,
            user,
        } => {
            let me = app.require_login().await?;
            let user_id = user
                .map(|raw| UserId::new(raw).map_err(|e| ClientError::InvalidInput(e.to_string())))
                .transpose()?;
            let games = app
                .games
                .history(&HistoryQuery {
                    page,
                    per_page,
                    user_id: user_id.clone(),
                })
                .await?;
            let perspective = user_id.unwrap_or(me.id);
            print!("{}", Formatter::history(&games, Some(&perspective)));
        }

        Command::Show { game_id } => {
            app.require_login().await?;
            let game = app.games.get(&parse_game_id(&game_id)?).await?;
            print!("{}", Formatter::game_summary(&game));
        }

        Command::Play { game_id } => {
            run_game(app, parse_game_id(&game_id)?, SessionMode::Play).await?;
        }

        Command::Watch { game_id } => {
            run_game(app, parse_game_id(&game_id)?, SessionMode::Watch).await?;
        }
    }

    Ok(())
}

async fn follow_open_games(app: &App) -> Result<(), ClientError> {
    let (_poller, mut results) = OpenGamesPoller::spawn(app.games.clone(), app.config.poll_interval);
    println!(
        "Refreshing every {}s, Ctrl+C to stop",
        app.config.poll_interval.as_secs()
    );

    loop {
        tokio::select! {
            result = results.recv() => match result {
                Some(Ok(games)) => {
                    println!("\n{}", chrono::Local::now().format("%H:%M:%S"));
                    print!("{}", Formatter::open_games(&games));
                }
                Some(Err(e)) if e.is_authorization() => return Err(e),
                Some(Err(e)) => println!("Error: {}", e),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
