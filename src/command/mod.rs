//! The request/response surface of the scene.
//!
//! Every scene operation has a [`Command`] counterpart, executed by
//! [`SceneTree::execute`](crate::scene::SceneTree::execute) and answered with a
//! [`Reply`]. The same commands are used in-process and by other threads, which
//! hand them over through a [`SceneClient`] and wait for the reply.

pub use self::channel::{channel, CommandReceiver, SceneClient};
pub use self::request::{ActorInfo, Command, DirectoryInfo, Reply};
pub use self::status::{CommandError, Status};

mod channel;
mod dispatch;
mod request;
mod status;
