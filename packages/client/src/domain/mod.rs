//! Domain layer: value objects, game snapshots, realtime events and the
//! interfaces (traits) the outer layers implement.

pub mod connector;
pub mod credentials;
pub mod error;
pub mod event;
pub mod game;
pub mod notation;
pub mod repository;
pub mod transport;
pub mod value_object;

pub use connector::{RealtimeConnector, RealtimeLink};
pub use credentials::{Credentials, UserProfile};
pub use error::{StoreError, ValidationError};
pub use event::{
    DrawDeclined, DrawOffered, GameEnd, GameUpdate, InboundEvent, OutboundAction, ServerError,
};
pub use game::{GameOutcome, GameSnapshot, GameStatus, TrackedGame};
pub use repository::CredentialStore;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
pub use value_object::{GameId, Side, UserId};
