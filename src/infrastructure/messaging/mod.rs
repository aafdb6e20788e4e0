pub mod connection;
pub mod notification_publisher_amqp;
pub mod remote_query_amqp;

pub use connection::AmqpConnectionManager;
