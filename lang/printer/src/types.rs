use pretty::termcolor::ColorSpec;

pub type Alloc<'a> = pretty::Arena<'a, ColorSpec>;
pub type Builder<'a> = pretty::DocBuilder<'a, Alloc<'a>, ColorSpec>;

/// Operator precedences
pub type Precedence = u32;

/// Precedence of the body of a binder, e.g. `\x. e` or `(x : A) -> B`
pub const PREC_BINDER: Precedence = 0;
/// Precedence of the operand of a type annotation `e : A`
pub const PREC_ANNO: Precedence = 1;
/// Precedence of the left-hand side of a function arrow `A -> B`
pub const PREC_ARROW_LHS: Precedence = 2;
/// Precedence of the operator of an application `f x`
pub const PREC_APP_OPERATOR: Precedence = 3;
/// Precedence of the argument of an application `f x` and of the target of a projection `e.m`
pub const PREC_ATOM: Precedence = 4;

pub trait Print {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.print_prec(cfg, alloc, 0)
    }

    /// Print with precedence information about the enclosing context.
    ///
    /// * `_prec` The precedence of the surrounding context.
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        self.print(cfg, alloc)
    }

    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String
    where
        Self: Sized,
    {
        crate::print_to_string::print_to_string(self, cfg)
    }

    /// Render on a single (very wide) line, for use in log messages
    fn print_trace(&self) -> String
    where
        Self: Sized,
    {
        let cfg = PrintCfg { width: crate::TRACE_WIDTH, ..Default::default() };
        crate::print_to_string::print_to_string(self, Some(&cfg))
    }
}

impl<T: Print> Print for &T {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        T::print(self, cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        T::print_prec(self, cfg, alloc, prec)
    }
}

impl<T: Print> Print for Box<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        T::print(self, cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        T::print_prec(self, cfg, alloc, prec)
    }
}

impl Print for String {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        use pretty::DocAllocator;
        alloc.text(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PrintCfg {
    /// The width of the output terminal/device. Width is used for
    /// the insertion of linebreaks.
    pub width: usize,
    /// How many spaces of indentation are used
    pub indent: isize,
    /// Whether to print the syntactic sugar "A -> B" for quantifiers
    /// whose bound identifier does not occur in the codomain.
    pub print_function_sugar: bool,
    /// Whether to print the rank of the base universe, i.e. `Type0` instead of `Type`.
    pub print_base_rank: bool,
}

impl Default for PrintCfg {
    fn default() -> Self {
        Self {
            width: crate::DEFAULT_WIDTH,
            indent: 4,
            print_function_sugar: true,
            print_base_rank: false,
        }
    }
}
