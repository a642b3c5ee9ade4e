pub mod apply;
pub mod serve;
