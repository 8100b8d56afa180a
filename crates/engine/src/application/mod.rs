pub mod content;
pub mod dispatcher;
pub mod save_queue;
pub mod services;
