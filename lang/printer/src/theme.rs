use std::borrow::Cow;

use pretty::{
    DocAllocator,
    termcolor::{Color, ColorSpec},
};

use super::types::*;

const KEYWORD: Color = Color::Magenta;
const CTOR: Color = Color::Blue;
const DTOR: Color = Color::Green;
const TYPE: Color = Color::Red;
const LITERAL: Color = Color::Cyan;

pub trait ThemeExt<'a> {
    fn keyword<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a>;
    fn ctor<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a>;
    fn dtor<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a>;
    fn typ<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a>;
    fn literal<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a>;
}

impl<'a> ThemeExt<'a> for Alloc<'a> {
    fn keyword<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a> {
        self.text(text).annotate(KEYWORD.spec())
    }

    fn ctor<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a> {
        self.text(text).annotate(CTOR.spec())
    }

    fn dtor<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a> {
        self.text(text).annotate(DTOR.spec())
    }

    fn typ<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a> {
        self.text(text).annotate(TYPE.spec())
    }

    fn literal<T: Into<Cow<'a, str>>>(&'a self, text: T) -> Builder<'a> {
        self.text(text).annotate(LITERAL.spec())
    }
}

pub trait ColorExt {
    fn spec(self) -> ColorSpec;
}

impl ColorExt for Color {
    fn spec(self) -> ColorSpec {
        ColorSpec::new().set_fg(Some(self)).clone()
    }
}
