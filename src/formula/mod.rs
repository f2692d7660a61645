pub mod text;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn new(variable: Variable, negated: bool) -> Self {
        if negated {
            Literal::Negative(variable)
        } else {
            Literal::Positive(variable)
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn is_negated(&self) -> bool {
        !self.is_positive()
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }
}

/// A set of literals over distinct variables. Literal order carries no meaning,
/// but is kept as sampled so that serialization is reproducible.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Clauses over distinct variables drawn from `0..max_variable`, with up to
/// `max_len` literals each.
#[cfg(test)]
pub(crate) fn clause_strategy(max_variable: usize, max_len: usize) -> impl proptest::strategy::Strategy<Value = Clause> {
    use proptest::prelude::*;

    proptest::collection::vec((0..max_variable, any::<bool>()), 1..=max_len).prop_map(|pairs| {
        let mut seen = std::collections::HashSet::new();
        Clause::new(
            pairs
                .into_iter()
                .filter(|(x, _)| seen.insert(*x))
                .map(|(x, negated)| Literal::new(Variable(x), negated)),
        )
    })
}
