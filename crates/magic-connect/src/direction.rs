//! Direction inference between two validated connection endpoints
//!: the first matching rule orients the edge.

use magic_core::{Symbol, SymbolType};

/// Orients a pair of endpoint symbols as `(from, to)` using the first
/// matching rule:
/// 1. Data (Square/Circle) -> Operator.
/// 2. Operator -> Output (Star).
/// 3. Function (Circle) -> Output.
/// 4. Main (DoubleCircle) -> anything.
/// 5. Smaller y first; ties broken by smaller x.
pub fn orient<'a>(a: &'a Symbol, b: &'a Symbol) -> (&'a Symbol, &'a Symbol) {
    if is_data(a) && b.symbol_type.is_operator() {
        return (a, b);
    }
    if is_data(b) && a.symbol_type.is_operator() {
        return (b, a);
    }
    if a.symbol_type.is_operator() && is_output(b) {
        return (a, b);
    }
    if b.symbol_type.is_operator() && is_output(a) {
        return (b, a);
    }
    if is_function(a) && is_output(b) {
        return (a, b);
    }
    if is_function(b) && is_output(a) {
        return (b, a);
    }
    if matches!(a.symbol_type, SymbolType::DoubleCircle) {
        return (a, b);
    }
    if matches!(b.symbol_type, SymbolType::DoubleCircle) {
        return (b, a);
    }
    if a.position.y < b.position.y || (a.position.y == b.position.y && a.position.x <= b.position.x) {
        (a, b)
    } else {
        (b, a)
    }
}

fn is_data(s: &Symbol) -> bool {
    matches!(s.symbol_type, SymbolType::Square | SymbolType::Circle)
}

fn is_function(s: &Symbol) -> bool {
    matches!(s.symbol_type, SymbolType::Circle)
}

fn is_output(s: &Symbol) -> bool {
    matches!(s.symbol_type, SymbolType::Star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{PatternTag, Position, SymbolId};

    fn symbol(id: u32, kind: SymbolType, x: f64, y: f64) -> Symbol {
        Symbol::new(SymbolId::from_index(id as usize), kind, Position::new(x, y), 10.0, 1.0, PatternTag::Empty)
    }

    #[test]
    fn square_flows_into_operator() {
        let square = symbol(0, SymbolType::Square, 0.0, 0.0);
        let op = symbol(1, SymbolType::Convergence, 10.0, 0.0);
        let (from, to) = orient(&square, &op);
        assert_eq!(from.symbol_type, SymbolType::Square);
        assert_eq!(to.symbol_type, SymbolType::Convergence);
    }

    #[test]
    fn operator_flows_into_star() {
        let op = symbol(0, SymbolType::Convergence, 0.0, 0.0);
        let star = symbol(1, SymbolType::Star, 10.0, 0.0);
        let (from, to) = orient(&op, &star);
        assert_eq!(from.symbol_type, SymbolType::Convergence);
        assert_eq!(to.symbol_type, SymbolType::Star);
    }

    #[test]
    fn falls_back_to_smaller_y_first() {
        let a = symbol(0, SymbolType::Pentagon, 0.0, 50.0);
        let b = symbol(1, SymbolType::Hexagon, 0.0, 10.0);
        let (from, to) = orient(&a, &b);
        assert_eq!(from.symbol_type, SymbolType::Hexagon);
        assert_eq!(to.symbol_type, SymbolType::Pentagon);
    }
}
