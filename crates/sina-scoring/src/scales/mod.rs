pub mod alda;
pub mod gaf;
pub mod hdrs;
pub mod sao;
pub mod spaq;
pub mod ymrs;
