pub(crate) mod composite;
pub mod surface;
pub mod terminal;
