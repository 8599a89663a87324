pub mod capture_graph;
pub mod capture_stream;
