pub mod ast;
pub mod error;
pub mod parser;

pub mod prelude {
    pub use super::{
        ast::*,
        error::*,
        parser::*
    };
}
