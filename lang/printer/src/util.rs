use pretty::DocAllocator;

use super::tokens::SEMICOLON;
use super::types::*;

pub trait ParensIfExt<'a> {
    /// Wrap the document in parentheses if `cond` holds.
    fn parens_if(self, cond: bool) -> Builder<'a>;
}

impl<'a> ParensIfExt<'a> for Builder<'a> {
    fn parens_if(self, cond: bool) -> Builder<'a> {
        if cond { self.parens() } else { self }
    }
}

/// Print a sequence of items separated by `sep` followed by a breakable space.
pub fn sep_by<'a, I>(alloc: &'a Alloc<'a>, items: I, sep: &'a str) -> Builder<'a>
where
    I: IntoIterator<Item = Builder<'a>>,
{
    alloc.intersperse(items, alloc.text(sep).append(alloc.line()))
}

/// Print `{ item; item }`, breaking one item per line if the block does not fit.
pub fn braces_block<'a, I>(alloc: &'a Alloc<'a>, cfg: &PrintCfg, items: I) -> Builder<'a>
where
    I: IntoIterator<Item = Builder<'a>>,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return alloc.text("{}");
    }
    alloc
        .line()
        .append(sep_by(alloc, items, SEMICOLON))
        .nest(cfg.indent)
        .append(alloc.line())
        .braces()
        .group()
}
