pub mod server_actors;
