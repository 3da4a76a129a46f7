mod assignments;
pub use assignments::Assignments;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_find_in_set;
pub use expr_find_in_set::ExprFindInSet;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod op_binary;
pub use op_binary::BinaryOp;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_chrono;
