//! Integration tests for the deployment workflow

mod test_create;
mod test_guard;
mod test_init;
mod test_session;
