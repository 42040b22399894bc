//! Client for the notes backend: a typed HTTP API, a local view of the
//! store, and a controller that keeps the two in sync.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod notification;
pub mod state;

pub use api::{NotesApiClient, NotesBackend};
pub use config::ClientConfig;
pub use controller::{Form, NotesController};
pub use error::{ClientError, ClientResult};
pub use notification::{Notification, NotificationKind};
pub use state::NotesView;
