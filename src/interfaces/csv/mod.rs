pub mod listing_reader;
pub mod order_writer;
