pub mod auth;
pub mod budget;
pub mod config;
pub mod expense;
pub mod profile;
pub mod system;
pub mod view;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(auth::definitions())
        .chain(budget::definitions())
        .chain(expense::definitions())
        .chain(view::definitions())
        .chain(profile::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
