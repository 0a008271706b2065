pub mod connection;
pub mod publish;

pub use connection::connect;
pub use publish::publish_reading;
