//! Processors chain a [`DocumentReader`](crate::io::DocumentReader) and a [`DocumentWriter`](crate::io::DocumentWriter).

pub mod simple;
