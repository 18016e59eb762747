pub mod event_consumer;
