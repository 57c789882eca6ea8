//! Edges of the system: reading a catalog and exporting the order history.

pub mod csv;
