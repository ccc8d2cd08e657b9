pub mod client_actors;
pub mod directions;
pub mod messages;
pub mod radius_search;
pub mod registration;
pub mod selection;
pub mod session;

#[cfg(test)]
mod test_support;
