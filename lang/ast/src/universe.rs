use std::fmt;

use strata_lang_printer::{
    Alloc, Builder, Precedence, Print, PrintCfg,
    theme::ThemeExt,
    tokens::{EXISTS, FORALL, TYPE},
};

/// A stratification level. `Type_n` classifies `Type_{n-1}`, and
/// value terms live at rank 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Universe {
    pub rank: u32,
}

impl Universe {
    /// The universe of value terms
    pub const BASE: Universe = Universe { rank: 0 };

    pub const fn new(rank: u32) -> Self {
        Universe { rank }
    }

    pub const fn succ(self) -> Self {
        Universe { rank: self.rank + 1 }
    }

    pub const fn is_base(self) -> bool {
        self.rank == 0
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TYPE}{}", self.rank)
    }
}

impl Print for Universe {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        if self.is_base() && !cfg.print_base_rank {
            alloc.keyword(TYPE)
        } else {
            alloc.keyword(format!("{TYPE}{}", self.rank))
        }
    }
}

/// Distinguishes dependent functions (`Forall`) from dependent pairs (`Exists`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Forall,
    Exists,
}

impl Polarity {
    pub fn keyword(self) -> &'static str {
        match self {
            Polarity::Forall => FORALL,
            Polarity::Exists => EXISTS,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succ_increments_rank() {
        assert_eq!(Universe::BASE.succ().succ(), Universe::new(2));
    }

    #[test]
    fn base_rank_is_hidden_by_default() {
        assert_eq!(Universe::BASE.print_to_string(None), "Type");
        assert_eq!(Universe::new(3).print_to_string(None), "Type3");
        let cfg = PrintCfg { print_base_rank: true, ..Default::default() };
        assert_eq!(Universe::BASE.print_to_string(Some(&cfg)), "Type0");
    }
}
