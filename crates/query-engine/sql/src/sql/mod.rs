pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod string;
