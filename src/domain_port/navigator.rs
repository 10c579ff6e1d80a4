/// Receives the session-ended signal after an unrecoverable refresh failure.
pub trait SessionNavigator: Send + Sync {
    fn session_ended(&self);
}
