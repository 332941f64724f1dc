pub mod round_reader;
