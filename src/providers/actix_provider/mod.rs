pub mod facade;
pub mod headers;
pub(crate) mod impls;
pub mod middleware;
