pub mod browse;
pub mod card;
pub mod player;
pub mod watch;
