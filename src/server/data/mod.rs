//! Database repository layer.
//!
//! All collections share the `document` table. `DocumentRepository` is the only component
//! that talks to SeaORM; services build typed models on top of the documents it returns.

pub mod document;

#[cfg(test)]
mod test;
