// Handlers module

pub mod get_messages;
pub mod send_message;
pub mod ws;

pub use get_messages::get_messages_handler;
pub use send_message::send_message_handler;
pub use ws::ws_handler;
