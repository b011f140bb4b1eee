//! Use-case layer: session handling, REST use cases, the realtime connection
//! manager and the game view.

pub mod auth;
pub mod authenticated_request;
pub mod connection;
pub mod game;
pub mod game_view;
pub mod lobby;
pub mod profile;
pub mod session;

pub use auth::AuthUseCase;
pub use authenticated_request::AuthenticatedClient;
pub use connection::{ConnectionChange, ConnectionManager, ConnectionStatus};
pub use game::{GameUseCase, HistoryQuery};
pub use game_view::GameView;
pub use lobby::{OpenGamesPoller, OpenGamesResult};
pub use profile::ProfileUseCase;
pub use session::{Session, SharedSession};
