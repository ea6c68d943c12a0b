pub mod consts;
pub mod random;
pub mod routes;
pub mod state;
