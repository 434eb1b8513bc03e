mod cli;
mod server;

pub(crate) use cli::{as_cli, Command};
pub(crate) use server::as_server;
