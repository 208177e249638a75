mod user;

pub use user::{ActorContext, Role, UserAccount};
