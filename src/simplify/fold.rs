//! Constant folding over two numeric leaves. Exact operands stay exact;
//! any real operand routes through `f64`. `None` leaves the node alone.

use crate::expr::BinOp;
use crate::number::Number;

pub fn fold_binary(op: BinOp, a: &Number, b: &Number) -> Option<Number> {
    match op {
        BinOp::Add => Some(a.add(b)),
        BinOp::Sub => Some(a.sub(b)),
        BinOp::Mul => Some(a.mul(b)),
        BinOp::Div => a.div(b).ok(),
        BinOp::Pow => a.pow(b),
        BinOp::Rem => None,
    }
}
